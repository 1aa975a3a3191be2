// Custom types that are widely used are defined here.

// Handle types. These index into the arenas of the Database.
pub type TeamId = u8;
pub type PlayerId = u16;

// Player rating, between 0 and 99.
pub type Rating = u8;

// Value of a single statistics counter.
pub type StatValue = i32;

// A game between two teams, home team first.
pub type Matchup = [TeamId; 2];

// Type conversions.
pub mod convert {
    use std::fmt::Display;

    // Convert between integers.
    pub fn int<N1: Display + Copy, N2: TryFrom<N1>>(num: N1) -> N2 {
        match num.try_into() {
            Ok(n) => n,
            Err(_) => panic!("num: {num}")
        }
    }
}
