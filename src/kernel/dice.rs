use tracing::debug;

use super::random::RandomSource;

pub const DIE_FACES: u32 = 6;
pub const DEFAULT_DICE_COUNT: u32 = 1;
/// Upper bound on dice per request.
pub const MAX_DICE_COUNT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceThrow {
    pub rolls: Vec<u32>,
    pub sum: u32,
}

impl DiceThrow {
    pub fn count(&self) -> usize {
        self.rolls.len()
    }
}

/// Reads a dice count the way the platform's numbers arrive: leading digits
/// after optional whitespace (`"2個"` is 2). Missing, non-numeric or zero
/// falls back to 1. Anything above `MAX_DICE_COUNT`, including digit runs too
/// long for `u32`, is capped; the turn then narrates the capped count.
pub fn parse_dice_count(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_DICE_COUNT;
    };

    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return DEFAULT_DICE_COUNT;
    }

    match digits.parse::<u32>() {
        Ok(0) => DEFAULT_DICE_COUNT,
        Ok(n) => n.min(MAX_DICE_COUNT),
        // only an over-long digit run gets here
        Err(_) => MAX_DICE_COUNT,
    }
}

pub fn throw_dice(count: u32, rng: &dyn RandomSource) -> DiceThrow {
    debug!("throw {} times", count);
    let rolls: Vec<u32> = (0..count)
        .map(|i| {
            let face = rng.gen_range(1, DIE_FACES);
            debug!("{} time: {}", i + 1, face);
            face
        })
        .collect();
    let sum = rolls.iter().sum();
    DiceThrow { rolls, sum }
}

pub fn narration_text(count: u32) -> String {
    format!("サイコロを {}個 投げます。", count)
}

/// Result sentence: one die reports the sum, two or three list every roll,
/// four or more report only count and sum.
pub fn result_text(throw: &DiceThrow) -> String {
    match throw.count() {
        0 | 1 => format!("結果は {} です。", throw.sum),
        2 | 3 => {
            let listed = throw
                .rolls
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("結果は {} で、合計 {} です。", listed, throw.sum)
        }
        n => format!("{}個のサイコロの合計は {} です。", n, throw.sum),
    }
}
