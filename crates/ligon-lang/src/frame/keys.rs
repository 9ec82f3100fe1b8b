use std::fmt;

/// Keyboard key a script can bind with `input.map_key`.
///
/// Backends map their own key codes into these variants; script names are
/// matched case-insensitively through `Key::from_name`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Key {
    // Control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    Up,
    Down,
    Left,
    Right,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,
}

impl Key {
    pub const ALL: [Key; 63] = [
        Key::Escape, Key::Enter, Key::Tab, Key::Backspace, Key::Space,
        Key::Insert, Key::Delete, Key::Home, Key::End, Key::PageUp, Key::PageDown,
        Key::Up, Key::Down, Key::Left, Key::Right,
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
        Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
        Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
        Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
        Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6,
        Key::F7, Key::F8, Key::F9, Key::F10, Key::F11, Key::F12,
    ];

    /// Canonical upper-case script name.
    pub fn name(self) -> &'static str {
        match self {
            Key::Escape    => "ESCAPE",
            Key::Enter     => "RETURN",
            Key::Tab       => "TAB",
            Key::Backspace => "BACKSPACE",
            Key::Space     => "SPACE",
            Key::Insert    => "INSERT",
            Key::Delete    => "DELETE",
            Key::Home      => "HOME",
            Key::End       => "END",
            Key::PageUp    => "PAGEUP",
            Key::PageDown  => "PAGEDOWN",
            Key::Up        => "UP",
            Key::Down      => "DOWN",
            Key::Left      => "LEFT",
            Key::Right     => "RIGHT",
            Key::A => "A", Key::B => "B", Key::C => "C", Key::D => "D",
            Key::E => "E", Key::F => "F", Key::G => "G", Key::H => "H",
            Key::I => "I", Key::J => "J", Key::K => "K", Key::L => "L",
            Key::M => "M", Key::N => "N", Key::O => "O", Key::P => "P",
            Key::Q => "Q", Key::R => "R", Key::S => "S", Key::T => "T",
            Key::U => "U", Key::V => "V", Key::W => "W", Key::X => "X",
            Key::Y => "Y", Key::Z => "Z",
            Key::Digit0 => "0", Key::Digit1 => "1", Key::Digit2 => "2",
            Key::Digit3 => "3", Key::Digit4 => "4", Key::Digit5 => "5",
            Key::Digit6 => "6", Key::Digit7 => "7", Key::Digit8 => "8",
            Key::Digit9 => "9",
            Key::F1  => "F1",  Key::F2  => "F2",  Key::F3  => "F3",
            Key::F4  => "F4",  Key::F5  => "F5",  Key::F6  => "F6",
            Key::F7  => "F7",  Key::F8  => "F8",  Key::F9  => "F9",
            Key::F10 => "F10", Key::F11 => "F11", Key::F12 => "F12",
        }
    }

    /// Resolve a script key name. `ENTER`/`RETURN` and `ESC`/`ESCAPE` are
    /// aliases.
    pub fn from_name(name: &str) -> Option<Key> {
        let upper = name.trim().to_ascii_uppercase();
        match upper.as_str() {
            "ENTER" => return Some(Key::Enter),
            "ESC"   => return Some(Key::Escape),
            _ => {}
        }
        Key::ALL.into_iter().find(|k| k.name() == upper)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for key in Key::ALL {
            assert_eq!(Key::from_name(key.name()), Some(key));
        }
    }

    #[test]
    fn aliases_and_case() {
        assert_eq!(Key::from_name("enter"), Some(Key::Enter));
        assert_eq!(Key::from_name("Esc"), Some(Key::Escape));
        assert_eq!(Key::from_name("space"), Some(Key::Space));
        assert_eq!(Key::from_name("HYPER"), None);
    }
}
