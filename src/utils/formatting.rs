/// Up to two uppercase initials from a display name ("Vega Nova" -> "VN")
pub fn initials_of(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .flat_map(char::to_uppercase)
        .take(2)
        .collect();

    if initials.is_empty() {
        "?".to_string()
    } else {
        initials
    }
}
