use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub(crate) fn is_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
}

pub(crate) fn is_confirm(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter)
}

pub(crate) fn is_up(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Up | KeyCode::Char('k'))
}

pub(crate) fn is_down(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Down | KeyCode::Char('j'))
}

pub(crate) fn is_toggle(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char(' '))
}

pub(crate) fn is_filter_focus(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('/'))
}

pub(crate) fn is_filter_leave(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
}

pub(crate) fn is_cycle_forward(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Tab | KeyCode::Char('L'))
        || (key.code == KeyCode::Right && key.modifiers.contains(KeyModifiers::SHIFT))
}

pub(crate) fn is_cycle_backward(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::BackTab | KeyCode::Char('H'))
        || (key.code == KeyCode::Left && key.modifiers.contains(KeyModifiers::SHIFT))
}
