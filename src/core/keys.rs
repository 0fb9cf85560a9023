//! Symbolic key names for hotkey items.
//!
//! A key value is a modifier mask OR'ed with either a special-key code or
//! the (lowercase) character code of a printable key. `Ctrl-Shift-F1`,
//! `Alt-x` and `Space` are all valid spellings.

pub const KEY_MODIFIER_ALT: i64 = 0x0100_0000;
pub const KEY_MODIFIER_SHIFT: i64 = 0x0200_0000;
pub const KEY_MODIFIER_CTRL: i64 = 0x0400_0000;
pub const KEY_MODIFIER_META: i64 = 0x0800_0000;
pub const KEY_MODIFIER_COMMAND: i64 = 0x1000_0000;
pub const KEY_MODIFIER: i64 = 0xFF00_0000;

pub const KEY_SPECIAL: i64 = 0x00FF_0000;
pub const KEY_LEFT: i64 = 0x0021_0000;
pub const KEY_RIGHT: i64 = 0x0022_0000;
pub const KEY_UP: i64 = 0x0023_0000;
pub const KEY_DOWN: i64 = 0x0024_0000;
pub const KEY_SPACE: i64 = 0x0025_0000;
pub const KEY_ENTER: i64 = 0x0026_0000;
pub const KEY_F1: i64 = 0x0027_0000;
pub const KEY_HOME: i64 = 0x0033_0000;
pub const KEY_END: i64 = 0x0034_0000;
pub const KEY_PAGEUP: i64 = 0x0035_0000;
pub const KEY_PAGEDOWN: i64 = 0x0036_0000;
pub const KEY_TAB: i64 = 0x0037_0000;
pub const KEY_BACKSPACE: i64 = 0x0038_0000;
pub const KEY_MOUSEWHEELUP: i64 = 0x0039_0000;
pub const KEY_MOUSEWHEELDOWN: i64 = 0x003A_0000;
pub const KEY_ESC: i64 = 0x003B_0000;
pub const KEY_INSERT: i64 = 0x003C_0000;
pub const KEY_DELETE: i64 = 0x003D_0000;

const MODIFIERS: &[(&str, i64)] = &[
    ("Alt", KEY_MODIFIER_ALT),
    ("Shift", KEY_MODIFIER_SHIFT),
    ("Ctrl", KEY_MODIFIER_CTRL),
    ("Meta", KEY_MODIFIER_META),
    ("Command", KEY_MODIFIER_COMMAND),
];

const KEYS: &[(&str, i64)] = &[
    ("Unset", 0),
    ("Left", KEY_LEFT),
    ("Right", KEY_RIGHT),
    ("Up", KEY_UP),
    ("Down", KEY_DOWN),
    ("Space", KEY_SPACE),
    ("Enter", KEY_ENTER),
    ("F1", KEY_F1),
    ("F2", KEY_F1 + 0x1_0000),
    ("F3", KEY_F1 + 0x2_0000),
    ("F4", KEY_F1 + 0x3_0000),
    ("F5", KEY_F1 + 0x4_0000),
    ("F6", KEY_F1 + 0x5_0000),
    ("F7", KEY_F1 + 0x6_0000),
    ("F8", KEY_F1 + 0x7_0000),
    ("F9", KEY_F1 + 0x8_0000),
    ("F10", KEY_F1 + 0x9_0000),
    ("F11", KEY_F1 + 0xA_0000),
    ("F12", KEY_F1 + 0xB_0000),
    ("Home", KEY_HOME),
    ("End", KEY_END),
    ("Page Up", KEY_PAGEUP),
    ("Page Down", KEY_PAGEDOWN),
    ("Tab", KEY_TAB),
    ("Backspace", KEY_BACKSPACE),
    ("Mouse Wheel Up", KEY_MOUSEWHEELUP),
    ("Mouse Wheel Down", KEY_MOUSEWHEELDOWN),
    ("Esc", KEY_ESC),
    ("Insert", KEY_INSERT),
    ("Delete", KEY_DELETE),
];

/// Translate a key name such as `Ctrl-Left` into its numeric code.
///
/// Matching is case-insensitive. Unknown names yield 0 (unset).
pub fn string_to_key(name: &str) -> i64 {
    let mut code = 0;
    let mut rest = name;

    'modifiers: loop {
        for &(modifier, mask) in MODIFIERS {
            let Some(head) = rest.get(..modifier.len()) else {
                continue;
            };
            if head.eq_ignore_ascii_case(modifier) && rest[modifier.len()..].starts_with('-') {
                code |= mask;
                rest = &rest[modifier.len() + 1..];
                continue 'modifiers;
            }
        }
        break;
    }

    if let Some(&(_, key)) = KEYS.iter().find(|(n, _)| n.eq_ignore_ascii_case(rest)) {
        return code | key;
    }

    let mut chars = rest.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() => code | i64::from(u32::from(c.to_ascii_lowercase())),
        _ => 0,
    }
}

/// Render a key code back into its canonical name.
pub fn key_to_string(code: i64) -> Option<String> {
    let mut out = String::new();
    for &(modifier, mask) in MODIFIERS {
        if code & mask != 0 {
            out.push_str(modifier);
            out.push('-');
        }
    }

    let key = code & !KEY_MODIFIER;
    if let Some(&(name, _)) = KEYS.iter().find(|&&(_, k)| k == key) {
        out.push_str(name);
        return Some(out);
    }

    let c = u32::try_from(key).ok().and_then(char::from_u32)?;
    out.push(c);
    Some(out)
}
