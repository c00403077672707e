use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Theme;
use crate::records::RecordStore;
use crate::store::KeyValueStore;

pub fn show<S: KeyValueStore>(store: &RecordStore<S>) -> Result<CmdResult> {
    let theme = store.theme()?;
    let mut result = CmdResult::default().with_theme(theme);
    result.add_message(CmdMessage::info(format!("Theme: {}", theme)));
    Ok(result)
}

pub fn set<S: KeyValueStore>(store: &mut RecordStore<S>, theme: Theme) -> Result<CmdResult> {
    store.set_theme(theme)?;
    let mut result = CmdResult::default().with_theme(theme);
    result.add_message(CmdMessage::success(format!("Theme set to {}", theme)));
    Ok(result)
}

pub fn toggle<S: KeyValueStore>(store: &mut RecordStore<S>) -> Result<CmdResult> {
    let next = store.theme()?.toggle();
    set(store, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn toggle_flips_and_persists() {
        let mut store = RecordStore::new(InMemoryStore::new());

        let result = toggle(&mut store).unwrap();
        assert_eq!(result.theme, Some(Theme::Dark));
        assert_eq!(store.theme().unwrap(), Theme::Dark);

        toggle(&mut store).unwrap();
        assert_eq!(show(&store).unwrap().theme, Some(Theme::Light));
    }
}
