use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the gallery to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    SelectPrevious,
    SelectNext,
    /// "Read More" / "Show Less" on the selected card.
    ToggleSelected,
    /// "Not Interested" on the selected card.
    RemoveSelected,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<UiCommand> {
    // Windows reports releases too.
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(UiCommand::Quit),
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => Some(UiCommand::Quit),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => Some(UiCommand::SelectPrevious),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => Some(UiCommand::SelectNext),
        (KeyCode::Enter, _) | (KeyCode::Char('r'), _) => Some(UiCommand::ToggleSelected),
        (KeyCode::Char('x'), _) | (KeyCode::Delete, _) => Some(UiCommand::RemoveSelected),
        _ => None,
    }
}
