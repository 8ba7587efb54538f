//! Keyboard handling: cursor movement and key bindings.

use crossterm::event::KeyCode;
use tictactoe_core::{GameConfig, InputEvent, Position};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Leave the program.
    Quit,
    /// Move the board cursor.
    Cursor(Position),
    /// Forward to the controller.
    Send(InputEvent),
    /// Unbound key.
    Ignore,
}

/// Maps a key to an action given the cursor and active configuration.
pub fn map_key(code: KeyCode, cursor: Position, config: &GameConfig) -> KeyAction {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => {
            KeyAction::Cursor(move_cursor(cursor, code))
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            KeyAction::Send(InputEvent::CellSelected(cursor.to_index()))
        }
        KeyCode::Char(c) if c.is_ascii_digit() => match Position::from_digit(c) {
            Some(pos) => KeyAction::Send(InputEvent::CellSelected(pos.to_index())),
            None => KeyAction::Ignore,
        },
        KeyCode::Char('u') => KeyAction::Send(InputEvent::UndoRequested),
        KeyCode::Char('r') => KeyAction::Send(InputEvent::NewRoundRequested),
        KeyCode::Char('n') => KeyAction::Send(InputEvent::NewGameRequested),
        KeyCode::Char('m') => KeyAction::Send(InputEvent::ConfigChanged(
            config.with_mode(config.mode.toggle()),
        )),
        KeyCode::Char('x') => KeyAction::Send(InputEvent::ConfigChanged(
            config.with_human_mark(config.human_mark.opponent()),
        )),
        KeyCode::Char('l') => KeyAction::Send(InputEvent::ConfigChanged(
            config.with_cpu_level(config.cpu_level.next()),
        )),
        _ => KeyAction::Ignore,
    }
}

/// Moves cursor based on arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, col) = (cursor.row(), cursor.col());
    let (row, col) = match key {
        KeyCode::Up => (row.saturating_sub(1), col),
        KeyCode::Down => ((row + 1).min(2), col),
        KeyCode::Left => (row, col.saturating_sub(1)),
        KeyCode::Right => (row, (col + 1).min(2)),
        _ => (row, col),
    };
    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_core::{CpuLevel, Mark, Mode};

    #[test]
    fn test_cursor_moves_and_clamps() {
        assert_eq!(move_cursor(Position::Center, KeyCode::Up), Position::TopCenter);
        assert_eq!(move_cursor(Position::Center, KeyCode::Left), Position::MiddleLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Up), Position::TopLeft);
        assert_eq!(move_cursor(Position::TopLeft, KeyCode::Left), Position::TopLeft);
        assert_eq!(
            move_cursor(Position::BottomRight, KeyCode::Down),
            Position::BottomRight
        );
        assert_eq!(
            move_cursor(Position::MiddleRight, KeyCode::Right),
            Position::MiddleRight
        );
        assert_eq!(move_cursor(Position::Center, KeyCode::Tab), Position::Center);
    }

    #[test]
    fn test_select_keys() {
        let config = GameConfig::default();
        assert_eq!(
            map_key(KeyCode::Enter, Position::BottomLeft, &config),
            KeyAction::Send(InputEvent::CellSelected(6))
        );
        assert_eq!(
            map_key(KeyCode::Char('9'), Position::TopLeft, &config),
            KeyAction::Send(InputEvent::CellSelected(8))
        );
        assert_eq!(
            map_key(KeyCode::Char('0'), Position::TopLeft, &config),
            KeyAction::Ignore
        );
    }

    #[test]
    fn test_settings_keys_toggle_config() {
        let config = GameConfig::default();
        let KeyAction::Send(InputEvent::ConfigChanged(changed)) =
            map_key(KeyCode::Char('m'), Position::Center, &config)
        else {
            panic!("mode key should change config");
        };
        assert_eq!(changed.mode, Mode::PvCpu);

        let KeyAction::Send(InputEvent::ConfigChanged(changed)) =
            map_key(KeyCode::Char('x'), Position::Center, &config)
        else {
            panic!("mark key should change config");
        };
        assert_eq!(changed.human_mark, Mark::O);
        assert_eq!(changed.cpu_mark(), Mark::X);

        let KeyAction::Send(InputEvent::ConfigChanged(changed)) =
            map_key(KeyCode::Char('l'), Position::Center, &config)
        else {
            panic!("level key should change config");
        };
        assert_eq!(changed.cpu_level, CpuLevel::Hard);
    }

    #[test]
    fn test_quit_keys() {
        let config = GameConfig::default();
        assert_eq!(map_key(KeyCode::Char('q'), Position::Center, &config), KeyAction::Quit);
        assert_eq!(map_key(KeyCode::Esc, Position::Center, &config), KeyAction::Quit);
    }
}
