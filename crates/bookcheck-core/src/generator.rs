//! Synthetic book records
//!
//! [`generate`] produces a fresh batch on every call. Field values come from a
//! [`BookSource`]; the default [`RandomBookSource`] samples fixed word pools and
//! builds GTIN-8 style codes.

use std::collections::HashSet;

use rand::{rngs::ThreadRng, seq::SliceRandom, Rng};

use crate::{BookInput, Error, Result};

/// Attempts per record to find a code not already used in the batch
const MAX_CODE_ATTEMPTS: usize = 64;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bram", "Clarice", "Dorothy", "Elif", "Fyodor", "Grace", "Haruki", "Isabel", "Jorge",
    "Kazuo", "Leila", "Milan", "Nadine", "Orhan", "Penelope", "Quentin", "Rosa", "Salman",
    "Toni", "Ursula", "Virginia", "Wole", "Yasmina", "Zadie",
];

const LAST_NAMES: &[&str] = &[
    "Achebe", "Borges", "Calvino", "Duras", "Eliot", "Fitzgerald", "Gordimer", "Hurston",
    "Ishiguro", "Jansson", "Kafka", "Lessing", "Morrison", "Nabokov", "Oates", "Pamuk",
    "Rushdie", "Sebald", "Tolstoy", "Updike", "Vonnegut", "Woolf", "Yourcenar", "Zola",
];

const GENRES: &[&str] = &[
    "Classic",
    "Comic",
    "Crime",
    "Fable",
    "Fairy tale",
    "Fantasy",
    "Fiction",
    "Folklore",
    "Historical fiction",
    "Horror",
    "Humor",
    "Legend",
    "Mystery",
    "Mythology",
    "Poetry",
    "Realistic fiction",
    "Science fiction",
    "Short story",
    "Suspense",
    "Thriller",
];

const TITLE_ADJECTIVES: &[&str] = &[
    "Silent", "Crimson", "Forgotten", "Golden", "Hidden", "Last", "Lonely", "Northern", "Pale",
    "Restless", "Shattered", "Sleeping", "Wandering", "Winter",
];

const TITLE_NOUNS: &[&str] = &[
    "Archive", "Bridge", "Cartographer", "Garden", "Harbor", "Island", "Lantern", "Orchard",
    "River", "Season", "Tower", "Voyage", "Widow", "Wind",
];

/// Source of plausible field values for synthetic books.
///
/// Returning `None` means the source cannot produce that field; [`generate_with`]
/// then fails the whole batch.
pub trait BookSource {
    fn author(&mut self) -> Option<String>;
    fn genre(&mut self) -> Option<String>;
    fn title(&mut self) -> Option<String>;
    /// An 8-digit numeric code
    fn gtin8(&mut self) -> Option<String>;
}

/// Word-pool backed source driven by any [`Rng`]
#[derive(Debug, Clone)]
pub struct RandomBookSource<R = ThreadRng> {
    rng: R,
}

impl RandomBookSource<ThreadRng> {
    /// Source backed by the thread-local RNG
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for RandomBookSource<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RandomBookSource<R> {
    /// Source backed by a caller-supplied RNG (seeded RNGs give reproducible batches)
    pub const fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn pick(&mut self, pool: &[&str]) -> Option<String> {
        pool.choose(&mut self.rng).map(|s| (*s).to_string())
    }
}

impl<R: Rng> BookSource for RandomBookSource<R> {
    fn author(&mut self) -> Option<String> {
        let first = self.pick(FIRST_NAMES)?;
        let last = self.pick(LAST_NAMES)?;
        Some(format!("{first} {last}"))
    }

    fn genre(&mut self) -> Option<String> {
        self.pick(GENRES)
    }

    fn title(&mut self) -> Option<String> {
        let adjective = self.pick(TITLE_ADJECTIVES)?;
        let noun = self.pick(TITLE_NOUNS)?;
        Some(format!("The {adjective} {noun}"))
    }

    fn gtin8(&mut self) -> Option<String> {
        let body: Vec<u32> = (0..7).map(|_| self.rng.gen_range(0..10)).collect();
        let check = gtin_check_digit(&body);
        body.iter()
            .chain(std::iter::once(&check))
            .map(|d| char::from_digit(*d, 10))
            .collect()
    }
}

/// GS1 check digit: weights 3,1,3,1... from the leftmost of seven digits
fn gtin_check_digit(digits: &[u32]) -> u32 {
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * 3 } else { *d })
        .sum();
    (10 - sum % 10) % 10
}

/// Generate `count` records from the thread-local random source
///
/// # Errors
///
/// Returns an error if `count` is zero or the source cannot complete the batch.
pub fn generate(count: usize) -> Result<Vec<BookInput>> {
    generate_with(&mut RandomBookSource::new(), count)
}

/// Generate `count` records with unique codes from `source`
///
/// # Errors
///
/// Returns an error if:
/// - `count` is zero
/// - The source fails to produce any field
/// - No unused code is found within the attempt budget
pub fn generate_with<S: BookSource + ?Sized>(
    source: &mut S,
    count: usize,
) -> Result<Vec<BookInput>> {
    if count == 0 {
        return Err(Error::InvalidConfig(
            "record count must be a positive integer".to_string(),
        ));
    }

    let mut seen = HashSet::with_capacity(count);
    (0..count)
        .map(|index| {
            let author = required(source.author(), "author", index)?;
            let category = required(source.genre(), "category", index)?;
            let title = required(source.title(), "title", index)?;
            let code = unique_code(source, &mut seen, index)?;
            Ok(BookInput {
                author,
                category,
                title,
                code,
            })
        })
        .collect()
}

fn required(value: Option<String>, field: &str, index: usize) -> Result<String> {
    value.ok_or_else(|| Error::Generator(format!("no {field} produced for record {index}")))
}

fn unique_code<S: BookSource + ?Sized>(
    source: &mut S,
    seen: &mut HashSet<String>,
    index: usize,
) -> Result<String> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = required(source.gtin8(), "code", index)?;
        if seen.insert(code.clone()) {
            return Ok(code);
        }
    }
    Err(Error::Generator(format!(
        "no unique code for record {index} after {MAX_CODE_ATTEMPTS} attempts"
    )))
}
