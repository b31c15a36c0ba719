//! Fixed-template sentence assembly for the compose view.

use pictoboard_core::menu::MenuEntry;

/// Lead-in words of the fixed sentence template; the selected entry's
/// caption completes it.
pub const SENTENCE_LEAD_IN: [&str; 3] = ["yo", "quiero", "comer"];

/// Assembles the display sentence for `selected`, in order.
pub fn assemble(selected: &MenuEntry) -> Vec<String> {
    SENTENCE_LEAD_IN
        .iter()
        .map(|word| word.to_string())
        .chain(std::iter::once(selected.caption().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictoboard_core::menu::MenuId;
    use pictoboard_core::pictogram::PictogramDescriptor;

    #[test]
    fn test_sentence_ends_with_the_selected_caption() {
        let entry = MenuEntry {
            menu_id: MenuId(1),
            pictogram: PictogramDescriptor::new("42", "apple", "manzana"),
        };
        assert_eq!(assemble(&entry), vec!["yo", "quiero", "comer", "manzana"]);
    }

    #[test]
    fn test_sentence_falls_back_to_display_name() {
        let entry = MenuEntry {
            menu_id: MenuId(1),
            pictogram: PictogramDescriptor::new("42", "apple", ""),
        };
        assert_eq!(assemble(&entry).last().unwrap(), "apple");
    }
}
