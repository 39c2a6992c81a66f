use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;
use validator::Validate;

use crate::validation::{validate_phone_number, validate_user_dates};

/// A member of the club as stored in the user collection.
///
/// Admins are ordinary members with the `admin` flag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_user_dates"))]
pub struct User {
    pub id: Uuid,
    pub admin: bool,
    #[validate(length(min = 1, max = 100, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name is required"))]
    pub last_name: String,
    pub status: MemberStatus,
    pub facebook_name: String,
    #[serde(rename = "payPalName")]
    pub paypal_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(length(min = 1, message = "Street address is required"))]
    pub street_address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "Region is required"))]
    pub region: String,
    pub country: Country,
    #[validate(range(max = 99999, message = "Postal code must be at most five digits"))]
    pub postal_code: u32,
    pub occupation: String,
    pub chapter: Chapter,
    pub birthdate: Date,
    pub level: Level,
    #[serde(default)]
    pub boards: Vec<String>,
    #[serde(default)]
    pub surf_spots: Vec<String>,
    #[serde(default)]
    pub photo_url: String,
    #[validate(length(max = 2000, message = "Biography is too long"))]
    pub biography: String,
    pub started_surfing: Date,
    pub joined_date: Date,
    pub renewal_date: Option<Date>,
    pub entered_in_facebook_chapter: EnteredStatus,
    pub entered_in_facebook_wki: EnteredStatus,
    pub needs_new_member_bag: bool,
    pub won_surfboard: bool,
    pub date_surfboard_won: Option<Date>,
    /// Board positions held, past and present.
    #[serde(default)]
    pub positions: Vec<Position>,
}

/// A board position a member holds or has held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub name: PositionName,
    pub started: Date,
    /// `None` while the position is still held.
    pub ended: Option<Date>,
}

impl Position {
    /// A position the member currently holds.
    pub fn current(name: PositionName, started: Date) -> Self {
        Self {
            name,
            started,
            ended: None,
        }
    }

    /// A position the member held between two dates.
    pub fn former(name: PositionName, started: Date, ended: Date) -> Self {
        Self {
            name,
            started,
            ended: Some(ended),
        }
    }

    pub fn is_current(&self) -> bool {
        self.ended.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemberStatus {
    ActivePaying,
    ActiveNonPaying,
    Inactive,
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    UnitedStates,
    Canada,
    Mexico,
    Australia,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chapter {
    OrangeCountyLosAngeles,
    SanDiego,
    SantaCruz,
    Washington,
    Hawaii,
    International,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

/// Whether a member has been entered into one of the club's Facebook groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EnteredStatus {
    #[default]
    #[serde(rename = "None")]
    NotEntered,
    Entered,
    NotAccepted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionName {
    ChapterDirector,
    DirectorOfCommunityServices,
    DirectorOfEvents,
    DirectorOfMembership,
    Treasurer,
    Secretary,
}
