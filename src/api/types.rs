//! Request and response types for the clinic backend API.
//!
//! Records use camelCase JSON and the backend's `_id` identifier field.

use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

/// Session user record returned by `/auth/login` and `/auth/signup`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserData {
    /// Fill in `name` from first/last name when the backend omitted it.
    pub fn with_derived_name(mut self) -> Self {
        let has_name = self.name.as_deref().is_some_and(|n| !n.is_empty());
        if !has_name {
            if let Some(first) = self.first_name.as_deref().filter(|f| !f.is_empty()) {
                let last = self.last_name.as_deref().unwrap_or("");
                self.name = Some(format!("{} {}", first, last).trim().to_string());
            }
        }
        self
    }

    /// Name shown in the UI: `name`, else first/last, else the email's local part.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) {
            return name.to_string();
        }
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.email.split('@').next().unwrap_or_default().to_string()
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Login request body sent to POST /auth/login.
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request body sent to POST /auth/signup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
}

/// Response from /auth/login and /auth/signup.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserData,
}

/// Acknowledgement body returned by delete endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Account managed from the admin users screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

/// Body for POST /users.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub password: String,
}

/// Partial body for PUT /users/{id}.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub specialty: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Query filters for GET /doctors.
#[derive(Debug, Clone, Default)]
pub struct DoctorFilter {
    pub name: Option<String>,
    pub specialty: Option<String>,
}

impl DoctorFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(name) = &self.name {
            query.push(("name".to_string(), name.clone()));
        }
        if let Some(specialty) = &self.specialty {
            query.push(("specialty".to_string(), specialty.clone()));
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// Body for POST /services.
#[derive(Debug, Clone, Serialize)]
pub struct NewService {
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// Partial body for PUT /services/{id}.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ServiceUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Event banner shown on the public home page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub registration_link: String,
}

/// Body for POST /banners.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBanner {
    pub title: String,
    pub date: String,
    pub time: String,
    pub registration_link: String,
}

/// Partial body for PUT /banners/{id}.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Doctor and therapy counters shown on the about page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AboutStatistics {
    pub doctors: u64,
    pub therapies: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AboutInfo {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vision: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journey_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statistics: Option<AboutStatistics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub owner_photo: String,
}

/// Site-wide counters shown on the home page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsData {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub patients_treated: u64,
    #[serde(default)]
    pub test_reports: u64,
    #[serde(default)]
    pub hours_support: u64,
    #[serde(default)]
    pub recovery_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Partial body for PUT /statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patients_treated: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_reports: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours_support: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recovery_rate: Option<f64>,
}

/// A single statistics counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    PatientsTreated,
    TestReports,
    HoursSupport,
    RecoveryRate,
}

impl StatField {
    /// Parse the camelCase field name used by the backend.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "patientsTreated" => Some(Self::PatientsTreated),
            "testReports" => Some(Self::TestReports),
            "hoursSupport" => Some(Self::HoursSupport),
            "recoveryRate" => Some(Self::RecoveryRate),
            _ => None,
        }
    }

    /// Backend field name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PatientsTreated => "patientsTreated",
            Self::TestReports => "testReports",
            Self::HoursSupport => "hoursSupport",
            Self::RecoveryRate => "recoveryRate",
        }
    }

    /// Whether the counter only holds whole numbers.
    pub fn is_integral(self) -> bool {
        !matches!(self, Self::RecoveryRate)
    }

    /// Build an update that sets only this counter.
    ///
    /// `None` for negative or non-finite values, and for fractional values
    /// of whole-number counters.
    pub fn update(self, value: f64) -> Option<StatisticsUpdate> {
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        if self.is_integral() && value.fract() != 0.0 {
            return None;
        }
        let count = value as u64;
        let mut update = StatisticsUpdate::default();
        match self {
            Self::PatientsTreated => update.patients_treated = Some(count),
            Self::TestReports => update.test_reports = Some(count),
            Self::HoursSupport => update.hours_support = Some(count),
            Self::RecoveryRate => update.recovery_rate = Some(value),
        }
        Some(update)
    }

    /// Current value of this counter.
    pub fn read(self, stats: &StatisticsData) -> f64 {
        match self {
            Self::PatientsTreated => stats.patients_treated as f64,
            Self::TestReports => stats.test_reports as f64,
            Self::HoursSupport => stats.hours_support as f64,
            Self::RecoveryRate => stats.recovery_rate,
        }
    }
}
