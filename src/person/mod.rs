pub mod player;

use crate::error::{LeagueError, Result};

// The oldest a person can be.
pub const MAX_AGE: u8 = 99;

#[derive(Debug)]
#[derive(Default, Clone, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u8,
}

// Basics.
impl Person {
    pub fn build(name: &str, age: u8) -> Result<Self> {
        let person = Self {
            name: name.to_string(),
            age: age,
        };

        if !person.is_valid() {
            return Err(LeagueError::InvalidAttribute(format!("age {age} of {name} is not between 1 and {MAX_AGE}")));
        }
        return Ok(person);
    }

    // Check if the person in question does not have default traits.
    fn is_valid(&self) -> bool {
        self.name != String::default() &&
        (1..=MAX_AGE).contains(&self.age)
    }
}

// Functional.
impl Person {
    // Get a year older.
    pub fn age_year(&mut self) {
        self.age = self.age.saturating_add(1).min(MAX_AGE);
    }
}
