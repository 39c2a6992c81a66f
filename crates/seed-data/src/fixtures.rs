//! The fixed set of sample members inserted on every seed run.
//!
//! Each call builds a fresh set of records so callers can modify what they
//! get back without affecting anyone else. Record ids are generated per call.

use members::models::{
    Chapter, Country, EnteredStatus, Level, MemberStatus, Position, PositionName, User,
};
use time::macros::date;
use uuid::Uuid;

fn sample_boards() -> Vec<String> {
    vec!["5'10\" custom".to_string(), "8'2\" funboard".to_string()]
}

fn sample_surf_spots() -> Vec<String> {
    vec!["Bolsa Chica".to_string(), "Blackies".to_string()]
}

fn sample_positions() -> Vec<Position> {
    vec![
        Position::former(
            PositionName::DirectorOfCommunityServices,
            date!(2014 - 01 - 01),
            date!(2015 - 12 - 31),
        ),
        Position::current(PositionName::ChapterDirector, date!(2016 - 01 - 01)),
    ]
}

/// Returns the sample users in the order they are seeded: a regular member, then an admin.
pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: Uuid::new_v4(),
            admin: false,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            status: MemberStatus::ActivePaying,
            facebook_name: "Test User".to_string(),
            paypal_name: "test-user".to_string(),
            email: "user@user.com".to_string(),
            phone_number: "1234567890".to_string(),
            street_address: "1234 Test Drive".to_string(),
            city: "Orange".to_string(),
            region: "California".to_string(),
            country: Country::UnitedStates,
            postal_code: 92804,
            occupation: "Software Testing".to_string(),
            chapter: Chapter::OrangeCountyLosAngeles,
            birthdate: date!(1982 - 09 - 05),
            level: Level::Intermediate,
            boards: sample_boards(),
            surf_spots: sample_surf_spots(),
            photo_url: String::new(),
            biography: "I am a test user".to_string(),
            started_surfing: date!(1989 - 05 - 01),
            joined_date: date!(2000 - 08 - 15),
            renewal_date: Some(date!(2021 - 01 - 22)),
            entered_in_facebook_chapter: EnteredStatus::Entered,
            entered_in_facebook_wki: EnteredStatus::NotAccepted,
            needs_new_member_bag: true,
            won_surfboard: true,
            date_surfboard_won: Some(date!(2019 - 12 - 25)),
            positions: Vec::new(),
        },
        User {
            id: Uuid::new_v4(),
            admin: true,
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            status: MemberStatus::ActiveNonPaying,
            facebook_name: "Admin User".to_string(),
            paypal_name: "admin-a-user".to_string(),
            email: "admin@admin.com".to_string(),
            phone_number: "2345678901".to_string(),
            street_address: "1234 Admin Circle".to_string(),
            city: "Vancouver".to_string(),
            region: "British Columbia".to_string(),
            country: Country::Canada,
            postal_code: 98607,
            occupation: "Hardware Administration".to_string(),
            chapter: Chapter::Washington,
            birthdate: date!(1964 - 02 - 18),
            level: Level::Expert,
            boards: sample_boards(),
            surf_spots: sample_surf_spots(),
            photo_url: String::new(),
            biography: "I am an administrator".to_string(),
            started_surfing: date!(1977 - 11 - 01),
            joined_date: date!(1994 - 01 - 22),
            renewal_date: None,
            entered_in_facebook_chapter: EnteredStatus::Entered,
            entered_in_facebook_wki: EnteredStatus::Entered,
            needs_new_member_bag: false,
            won_surfboard: false,
            date_surfboard_won: None,
            positions: sample_positions(),
        },
    ]
}
