use crate::config::SLOT_COUNT;

/// Keyboard shortcut → slot index. Digits pick their own slot; a few
/// letters used by the scoreboard operators alias the first four slots.
pub fn slot_for_key(key: &str) -> Option<usize> {
    let key = key.to_lowercase();
    match key.as_str() {
        "r" => Some(0),
        "=" => Some(1),
        "-" => Some(2),
        "h" => Some(3),
        _ => key
            .parse::<usize>()
            .ok()
            .filter(|&i| i < SLOT_COUNT && key.len() == 1),
    }
}

/// Human slot label shown on cells and in the editor title.
pub fn slot_label(index: usize) -> String {
    format!("#{}", index)
}
