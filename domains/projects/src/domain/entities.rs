//! Domain entities for the Projects domain
//!
//! `FilmProject` is a flat record: every classification is a closed enumeration
//! stored as a PostgreSQL enum type and transmitted as its variant string.
//! `Insight` is an append-only note hanging off a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use filmtrack_common::{Error, Result};

use crate::domain::state::{PhaseLifecycle, ProjectPhase};

/// Maximum length of the free-text project fields (varchar(200))
pub const MAX_TEXT_FIELD_LENGTH: u64 = 200;

/// Maximum insight length (CHECK length <= 10000)
pub const MAX_INSIGHT_LENGTH: u64 = 10000;

/// Project identifier, assigned by the store starting at 1
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ProjectId(pub i64);

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Classification enums
// ============================================================================

/// Production scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "film_scale", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum Scale {
    Indie,
    Studio,
    Blockbuster,
}

impl Scale {
    pub const ALL: [Scale; 3] = [Self::Indie, Self::Studio, Self::Blockbuster];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Indie => "indie",
            Self::Studio => "studio",
            Self::Blockbuster => "blockbuster",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Indie => "Indie",
            Self::Studio => "Studio",
            Self::Blockbuster => "Blockbuster",
        }
    }
}

/// Production budget level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "budget_level", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum BudgetLevel {
    Low,
    Medium,
    High,
}

impl BudgetLevel {
    pub const ALL: [BudgetLevel; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Casting approach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "talent_strategy", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum TalentStrategy {
    Unknown,
    Emerging,
    Established,
    StarDriven,
}

impl TalentStrategy {
    pub const ALL: [TalentStrategy; 4] = [
        Self::Unknown,
        Self::Emerging,
        Self::Established,
        Self::StarDriven,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Emerging => "emerging",
            Self::Established => "established",
            Self::StarDriven => "starDriven",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Emerging => "Emerging Talent",
            Self::Established => "Established Talent",
            Self::StarDriven => "Star-Driven",
        }
    }
}

/// Health of the shoot as reported during production
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "production_health", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ProductionHealth {
    #[default]
    Good,
    AtRisk,
    Critical,
}

impl ProductionHealth {
    pub const ALL: [ProductionHealth; 3] = [Self::Good, Self::AtRisk, Self::Critical];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::AtRisk => "atRisk",
            Self::Critical => "critical",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::AtRisk => "At Risk",
            Self::Critical => "Critical",
        }
    }
}

/// Intended audience breadth
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "audience_type", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum AudienceType {
    Niche,
    Broad,
    Mainstream,
}

impl AudienceType {
    pub const ALL: [AudienceType; 3] = [Self::Niche, Self::Broad, Self::Mainstream];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Niche => "niche",
            Self::Broad => "broad",
            Self::Mainstream => "mainstream",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Niche => "Niche",
            Self::Broad => "Broad",
            Self::Mainstream => "Mainstream",
        }
    }
}

/// Marketing spend; `Unassigned` means not decided yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "marketing_budget_level", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum MarketingBudgetLevel {
    #[default]
    Unassigned,
    Low,
    Medium,
    High,
}

impl MarketingBudgetLevel {
    pub const ALL: [MarketingBudgetLevel; 4] =
        [Self::Unassigned, Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unassigned => "unassigned",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Unassigned => "Unassigned",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Unassigned)
    }
}

/// Lead marketing channel; `Undefined` means not decided yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, Default)]
#[sqlx(type_name = "marketing_channel", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum PrimaryMarketingChannel {
    #[default]
    Undefined,
    Pr,
    Influencer,
    DigitalAds,
    Festival,
}

impl PrimaryMarketingChannel {
    pub const ALL: [PrimaryMarketingChannel; 5] = [
        Self::Undefined,
        Self::Pr,
        Self::Influencer,
        Self::DigitalAds,
        Self::Festival,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Pr => "pr",
            Self::Influencer => "influencer",
            Self::DigitalAds => "digitalAds",
            Self::Festival => "festival",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Undefined => "Undefined",
            Self::Pr => "PR",
            Self::Influencer => "Influencer",
            Self::DigitalAds => "Digital Ads",
            Self::Festival => "Festival",
        }
    }

    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Undefined)
    }
}

/// How the film reaches audiences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "release_model", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum ReleaseModel {
    Theatre,
    Ott,
    Hybrid,
}

impl ReleaseModel {
    pub const ALL: [ReleaseModel; 3] = [Self::Theatre, Self::Ott, Self::Hybrid];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Theatre => "theatre",
            Self::Ott => "ott",
            Self::Hybrid => "hybrid",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Theatre => "Theatrical",
            Self::Ott => "OTT",
            Self::Hybrid => "Hybrid",
        }
    }
}

/// Confidence in the distribution deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "distribution_confidence", rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum DistributionConfidence {
    Low,
    Medium,
    High,
}

impl DistributionConfidence {
    pub const ALL: [DistributionConfidence; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(
    Scale,
    BudgetLevel,
    TalentStrategy,
    ProductionHealth,
    AudienceType,
    MarketingBudgetLevel,
    PrimaryMarketingChannel,
    ReleaseModel,
    DistributionConfidence,
);

// ============================================================================
// Validation helpers
// ============================================================================

fn validate_required_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    if value.chars().count() as u64 > MAX_TEXT_FIELD_LENGTH {
        return Err(Error::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_TEXT_FIELD_LENGTH
        )));
    }
    Ok(())
}

fn validate_planned_shoot_days(days: i32) -> Result<()> {
    if days < 1 {
        return Err(Error::Validation(
            "Planned shoot days must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Parse the single-character prefix used by the title lookup
pub fn title_prefix(letter: &str) -> Result<char> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(Error::Validation(
            "Title prefix must be exactly one character".to_string(),
        )),
    }
}

// ============================================================================
// FilmProject
// ============================================================================

/// Attributes supplied when creating a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFilmProject {
    pub title: String,
    pub genre: String,
    pub language: String,
    pub theme: String,
    pub scale: Scale,
    pub budget_level: BudgetLevel,
    pub talent_strategy: TalentStrategy,
    pub planned_shoot_days: i32,
    pub audience_type: AudienceType,
    pub marketing_budget_level: MarketingBudgetLevel,
    pub primary_marketing_channel: PrimaryMarketingChannel,
    pub release_model: ReleaseModel,
    pub distribution_confidence: DistributionConfidence,
}

impl NewFilmProject {
    pub fn validate(&self) -> Result<()> {
        validate_required_text("Title", &self.title)?;
        validate_required_text("Genre", &self.genre)?;
        validate_required_text("Language", &self.language)?;
        validate_required_text("Theme", &self.theme)?;
        validate_planned_shoot_days(self.planned_shoot_days)
    }
}

/// Full-record update: every mutable field is overwritten
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmProjectUpdate {
    pub title: String,
    pub phase: ProjectPhase,
    pub genre: String,
    pub language: String,
    pub theme: String,
    pub scale: Scale,
    pub budget_level: BudgetLevel,
    pub talent_strategy: TalentStrategy,
    pub planned_shoot_days: i32,
    pub actual_shoot_days: Option<i32>,
    pub production_health: ProductionHealth,
    pub audience_type: AudienceType,
    pub marketing_budget_level: MarketingBudgetLevel,
    pub primary_marketing_channel: PrimaryMarketingChannel,
    pub release_model: ReleaseModel,
    pub distribution_confidence: DistributionConfidence,
}

impl FilmProjectUpdate {
    /// Field-level checks that do not depend on the stored record
    pub fn validate(&self) -> Result<()> {
        validate_required_text("Title", &self.title)?;
        validate_required_text("Genre", &self.genre)?;
        validate_required_text("Language", &self.language)?;
        validate_required_text("Theme", &self.theme)?;
        validate_planned_shoot_days(self.planned_shoot_days)?;

        if let Some(actual) = self.actual_shoot_days {
            if actual < 0 {
                return Err(Error::Validation(
                    "Actual shoot days cannot be negative".to_string(),
                ));
            }
            if !self.phase.reports_actual_shoot_days() {
                return Err(Error::Validation(format!(
                    "Actual shoot days can only be recorded from {} ({}) onwards, project is in {}",
                    ProjectPhase::Production,
                    ProjectPhase::Production.name(),
                    self.phase
                )));
            }
        }
        Ok(())
    }
}

/// Film project record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct FilmProject {
    pub id: ProjectId,
    pub title: String,
    pub genre: String,
    pub language: String,
    pub theme: String,
    pub current_phase: ProjectPhase,
    pub scale: Scale,
    pub budget_level: BudgetLevel,
    pub talent_strategy: TalentStrategy,
    pub planned_shoot_days: i32,
    pub actual_shoot_days: Option<i32>,
    pub production_health: ProductionHealth,
    pub audience_type: AudienceType,
    pub marketing_budget_level: MarketingBudgetLevel,
    pub primary_marketing_channel: PrimaryMarketingChannel,
    pub release_model: ReleaseModel,
    pub distribution_confidence: DistributionConfidence,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_updated: DateTime<Utc>,
}

impl FilmProject {
    /// Build the initial record for a freshly allocated id
    pub fn new(id: ProjectId, new: NewFilmProject) -> Result<Self> {
        new.validate()?;

        Ok(FilmProject {
            id,
            title: new.title,
            genre: new.genre,
            language: new.language,
            theme: new.theme,
            current_phase: ProjectPhase::INITIAL,
            scale: new.scale,
            budget_level: new.budget_level,
            talent_strategy: new.talent_strategy,
            planned_shoot_days: new.planned_shoot_days,
            actual_shoot_days: None,
            production_health: ProductionHealth::default(),
            audience_type: new.audience_type,
            marketing_budget_level: new.marketing_budget_level,
            primary_marketing_channel: new.primary_marketing_channel,
            release_model: new.release_model,
            distribution_confidence: new.distribution_confidence,
            last_updated: Utc::now(),
        })
    }

    /// Overwrite every mutable field from a full update
    pub fn apply_update(&mut self, update: FilmProjectUpdate) -> Result<()> {
        update.validate()?;
        let phase = PhaseLifecycle::transition(self.current_phase, update.phase)
            .map_err(|e| Error::Validation(e.to_string()))?;

        self.title = update.title;
        self.current_phase = phase;
        self.genre = update.genre;
        self.language = update.language;
        self.theme = update.theme;
        self.scale = update.scale;
        self.budget_level = update.budget_level;
        self.talent_strategy = update.talent_strategy;
        self.planned_shoot_days = update.planned_shoot_days;
        self.actual_shoot_days = update.actual_shoot_days;
        self.production_health = update.production_health;
        self.audience_type = update.audience_type;
        self.marketing_budget_level = update.marketing_budget_level;
        self.primary_marketing_channel = update.primary_marketing_channel;
        self.release_model = update.release_model;
        self.distribution_confidence = update.distribution_confidence;
        self.touch();
        Ok(())
    }

    /// Move to a new phase, leaving every other field untouched
    pub fn advance_phase(&mut self, phase: ProjectPhase) -> Result<()> {
        self.current_phase = PhaseLifecycle::transition(self.current_phase, phase)
            .map_err(|e| Error::Validation(e.to_string()))?;
        self.touch();
        Ok(())
    }

    /// Refresh `last_updated`, never moving it backwards
    fn touch(&mut self) {
        self.last_updated = Utc::now().max(self.last_updated);
    }
}

// ============================================================================
// Insight
// ============================================================================

/// Append-only note attached to a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub content: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl Insight {
    /// Validate insight content (CHECK (length(trim(content)) > 0))
    pub fn validate_content(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(Error::Validation(
                "Insight content cannot be empty or whitespace-only".to_string(),
            ));
        }
        if content.chars().count() as u64 > MAX_INSIGHT_LENGTH {
            return Err(Error::Validation(format!(
                "Insight content must be at most {} characters",
                MAX_INSIGHT_LENGTH
            )));
        }
        Ok(())
    }

    /// Create the next entry of a log whose latest entry is `previous`
    pub fn append_after(content: String, previous: Option<&Insight>) -> Result<Self> {
        Self::validate_content(&content)?;
        let now = Utc::now();
        let timestamp = previous.map_or(now, |p| now.max(p.timestamp));
        Ok(Insight { content, timestamp })
    }
}

// ============================================================================
// Tests
// ============================================================================
