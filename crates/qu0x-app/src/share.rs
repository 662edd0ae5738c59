//! Share text for solved days.

use qu0x_core::Expression;
use qu0x_generator::DayIndex;

/// Colored square shown for each face 1-6.
const FACE_SQUARES: [&str; 6] = ["🟥", "⬜", "🟦", "🟨", "🟩", "⬛"];

/// Builds the spoiler-free text a player shares after solving a day.
///
/// Faces 1-6 become colored squares so the shape of the solution is visible
/// but not its numbers. Faces 7-9 stay as digits.
///
/// # Examples
///
/// ```
/// use qu0x_app::share_text;
/// use qu0x_generator::DayIndex;
///
/// let expr = "3^(5-2+1)+1".parse()?;
/// assert_eq!(share_text(DayIndex::FIRST, &expr), "Qu0x! 1: 🟦^(🟩-⬜+🟥)+🟥");
/// # Ok::<(), qu0x_core::ParseExpressionError>(())
/// ```
#[must_use]
pub fn share_text(day: DayIndex, expression: &Expression) -> String {
    let body: String = expression
        .to_string()
        .chars()
        .map(|ch| match ch.to_digit(10) {
            Some(face @ 1..=6) => FACE_SQUARES[face as usize - 1].to_owned(),
            _ => ch.to_string(),
        })
        .collect();
    format!("Qu0x! {}: {body}", day.game_number())
}
