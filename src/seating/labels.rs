//! Разбор свободных подписей рядов и мест ("R12", "PERMANTO 1", "Seat 14", "B").

/// Все цифры подписи, склеенные в одно число: "Seat 14" -> 14, "R1-2" -> 12.
///
/// Нет цифр или число не помещается в `u32` — значения нет.
pub fn numeric_value(label: &str) -> Option<u32> {
    let digits: String = label.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// Подпись из одной латинской буквы, приведённая к верхнему регистру.
pub fn single_letter(label: &str) -> Option<char> {
    let mut chars = label.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}
