use std::ops::RangeInclusive;

use rand::Rng;

const SECRET_RANGE: RangeInclusive<u32> = 1..=100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Invalid,
    TooLow,
    TooHigh,
    Correct { attempts: u32 },
}

impl GuessOutcome {
    pub fn message(&self) -> String {
        match self {
            GuessOutcome::Invalid => "Please enter a valid number.".to_string(),
            GuessOutcome::TooLow => "Too low! Try again.".to_string(),
            GuessOutcome::TooHigh => "Too high! Try again.".to_string(),
            GuessOutcome::Correct { attempts } => {
                format!("Congratulations! You guessed the number in {attempts} attempts.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessNumber {
    secret: u32,
    attempts: u32,
}

impl GuessNumber {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_secret(rng.random_range(SECRET_RANGE))
    }

    pub fn with_secret(secret: u32) -> Self {
        Self {
            secret,
            attempts: 0,
        }
    }

    pub fn intro() -> Vec<String> {
        vec![
            "Welcome to Guess the Number!".to_string(),
            format!(
                "I'm thinking of a number between {} and {}.",
                SECRET_RANGE.start(),
                SECRET_RANGE.end()
            ),
        ]
    }

    /// Every submitted line counts as an attempt, including ones that are
    /// not numbers.
    pub fn guess(&mut self, input: &str) -> GuessOutcome {
        self.attempts += 1;
        match input.trim().parse::<i64>() {
            Err(_) => GuessOutcome::Invalid,
            Ok(guess) if guess < i64::from(self.secret) => GuessOutcome::TooLow,
            Ok(guess) if guess > i64::from(self.secret) => GuessOutcome::TooHigh,
            Ok(_) => GuessOutcome::Correct {
                attempts: self.attempts,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};
    use rstest::*;

    #[rstest]
    #[case("10", GuessOutcome::TooLow)]
    #[case(" 99 ", GuessOutcome::TooHigh)]
    #[case("-5", GuessOutcome::TooLow)]
    #[case("forty-two", GuessOutcome::Invalid)]
    #[case("", GuessOutcome::Invalid)]
    #[case("42", GuessOutcome::Correct { attempts: 1 })]
    fn classifies_a_single_guess(#[case] input: &str, #[case] expected: GuessOutcome) {
        let mut game = GuessNumber::with_secret(42);
        assert_eq!(game.guess(input), expected);
    }

    #[test]
    fn counts_every_attempt() {
        let mut game = GuessNumber::with_secret(7);
        game.guess("abc");
        game.guess("3");
        game.guess("9");
        assert_eq!(game.guess("7"), GuessOutcome::Correct { attempts: 4 });
    }

    #[test]
    fn secret_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(1992);
        for _ in 0..200 {
            let game = GuessNumber::new(&mut rng);
            assert!(SECRET_RANGE.contains(&game.secret));
        }
    }

    #[test]
    fn correct_message_mentions_attempts() {
        assert_eq!(
            GuessOutcome::Correct { attempts: 3 }.message(),
            "Congratulations! You guessed the number in 3 attempts."
        );
    }
}
