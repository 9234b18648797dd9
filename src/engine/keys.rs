/// Number of bytes captured per key press.
pub const KEY_EVENT_LEN: usize = 4;

const ESC: u8 = 0x1b;
const CTRL_C: u8 = 0x03;

/// Raw bytes of a single key press, zero padded to `KEY_EVENT_LEN`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    bytes: [u8; KEY_EVENT_LEN],
    len: usize,
}

impl KeyEvent {
    /// The empty capture the loop starts with. Decodes as unrecognized.
    pub const EMPTY: KeyEvent = KeyEvent {
        bytes: [0; KEY_EVENT_LEN],
        len: 0,
    };

    /// Build an event from whatever a read returned. Bytes beyond
    /// `KEY_EVENT_LEN` are dropped.
    pub fn from_bytes(raw: &[u8]) -> Self {
        let len = raw.len().min(KEY_EVENT_LEN);
        let mut bytes = [0; KEY_EVENT_LEN];
        bytes[..len].copy_from_slice(&raw[..len]);
        Self { bytes, len }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// The full zero-padded capture.
    pub fn raw(&self) -> [u8; KEY_EVENT_LEN] {
        self.bytes
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn key(&self) -> Key {
        decode(self.as_bytes())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Quit,
    Enter,
    Up,
    Down,
    Left,
    Right,
    Unrecognized,
}

impl Key {
    pub fn is_arrow(self) -> bool {
        matches!(self, Key::Up | Key::Down | Key::Left | Key::Right)
    }

    /// Canonical byte sequence a terminal sends for this key.
    pub fn sequence(self) -> &'static [u8] {
        match self {
            Key::Quit => b"q",
            Key::Enter => b"\r",
            Key::Up => b"\x1b[A",
            Key::Down => b"\x1b[B",
            Key::Right => b"\x1b[C",
            Key::Left => b"\x1b[D",
            Key::Unrecognized => b"",
        }
    }
}

/// Classify the leading token of a capture.
///
/// Only complete sequences at the start of the buffer are recognized; any
/// trailing bytes are ignored. Modified arrows (`ESC [ 1 ; 5 A`), function
/// keys and a lone escape all fall through to `Key::Unrecognized`.
pub fn decode(bytes: &[u8]) -> Key {
    match bytes {
        [b'q', ..] | [CTRL_C, ..] => Key::Quit,
        [b'\r', ..] | [b'\n', ..] => Key::Enter,
        [ESC, b'[' | b'O', final_byte, ..] => match final_byte {
            b'A' => Key::Up,
            b'B' => Key::Down,
            b'C' => Key::Right,
            b'D' => Key::Left,
            _ => Key::Unrecognized,
        },
        _ => Key::Unrecognized,
    }
}
