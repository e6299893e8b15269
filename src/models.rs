// Data models for the dashboard's lists

use crate::error::UnknownVariant;
use crate::record::{IndexValue, Record, RecordId, SortValue, parse_number, parse_timestamp};
use crate::view::{SortDirection, ViewState};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::str::FromStr;

/// Placeholder shown for listings without any image
pub const PLACEHOLDER_IMAGE: &str = "/images/property-1.webp";

// ============================================================================
// Properties
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Condo,
    Villa,
    Studio,
}

impl PropertyType {
    pub const ALL: [PropertyType; 5] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Condo,
        PropertyType::Villa,
        PropertyType::Studio,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::House => "house",
            PropertyType::Condo => "condo",
            PropertyType::Villa => "villa",
            PropertyType::Studio => "studio",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Condo => "Condo",
            PropertyType::Villa => "Villa",
            PropertyType::Studio => "Studio",
        }
    }
}

impl FromStr for PropertyType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("property type", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    Available,
    Rented,
    Maintenance,
}

impl PropertyStatus {
    pub const ALL: [PropertyStatus; 3] = [
        PropertyStatus::Available,
        PropertyStatus::Rented,
        PropertyStatus::Maintenance,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PropertyStatus::Available => "available",
            PropertyStatus::Rented => "rented",
            PropertyStatus::Maintenance => "maintenance",
        }
    }

    /// Human-readable status
    pub fn label(self) -> &'static str {
        match self {
            PropertyStatus::Available => "Available",
            PropertyStatus::Rented => "Rented",
            PropertyStatus::Maintenance => "Maintenance",
        }
    }
}

impl FromStr for PropertyStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("property status", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyImage {
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

/// A property listing without its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub title: String,
    pub address: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub description: String,
    pub daily_price: String,
    pub monthly_price: String,
    pub currency: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: u32,
    pub property_type: PropertyType,
    pub status: PropertyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_wifi: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_parking: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_pool: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_gym: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_furnished: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_kitchen: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stay_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_stay_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<PropertyImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_image: Option<PropertyImage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl NewProperty {
    /// Full location string from address, city and country
    pub fn location(&self) -> String {
        let parts: Vec<&str> = [&self.address, &self.city, &self.country]
            .into_iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();

        if parts.is_empty() {
            "Address TBD".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Primary image URL, then first image, then the placeholder
    pub fn image(&self) -> &str {
        self.primary_image
            .as_ref()
            .or_else(|| self.images.first())
            .map(|img| img.image.as_str())
            .unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Monthly price with currency symbol, e.g. "₵575.00 / month"
    pub fn price_display(&self) -> String {
        let prefix = match self.currency.as_str() {
            "ghs" => "₵",
            "usd" => "$",
            _ => "",
        };
        format!("{}{} / month", prefix, self.monthly_price)
    }

    /// Rental period label from min/max stay
    pub fn rental_period_label(&self) -> String {
        let min = self.min_stay_months.unwrap_or(12);
        match self.max_stay_months {
            Some(max) if max != 0 && max != min => format!("{}–{} months", min, max),
            _ => match min {
                6 => "6 months".to_string(),
                12 => "1 year".to_string(),
                24 => "2 years".to_string(),
                _ => format!("{} months", min),
            },
        }
    }
}

/// A property listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: NewProperty,
}

impl Property {
    /// Sort key: last update time
    pub const SORT_LAST_UPDATED: &'static str = "updated_at";
    /// Sort key: monthly price
    pub const SORT_PRICE: &'static str = "price";

    /// Navigation target of the detail screen
    pub fn href(&self) -> String {
        format!("/dashboard/properties/{}", self.id)
    }

    /// Opening view of the properties table, most recently updated first
    pub fn table_view() -> ViewState {
        ViewState::new().sorted_by(
            Self::SORT_LAST_UPDATED,
            Self::default_direction(Self::SORT_LAST_UPDATED),
        )
    }
}

impl Record for Property {
    type Draft = NewProperty;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, data: NewProperty) -> Self {
        Self { id, data }
    }

    fn collection_name() -> &'static str {
        "estatery-properties"
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.id.to_string()),
            Cow::Borrowed(self.data.title.as_str()),
            Cow::Owned(self.data.location()),
        ]
    }

    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        let mut fields = HashMap::new();
        fields.insert("property_type".to_string(), self.data.property_type.as_str().into());
        fields.insert("status".to_string(), self.data.status.as_str().into());
        fields.insert("bedrooms".to_string(), IndexValue::Int(self.data.bedrooms.into()));
        fields.insert("currency".to_string(), self.data.currency.as_str().into());
        fields
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            Self::SORT_LAST_UPDATED => SortValue::Timestamp(parse_timestamp(self.data.updated_at.as_deref())),
            Self::SORT_PRICE => SortValue::Number(parse_number(&self.data.monthly_price)),
            "area" => SortValue::Number(self.data.area.into()),
            "title" => SortValue::Text(self.data.title.to_lowercase()),
            _ => SortValue::Number(0.0),
        }
    }

    fn default_direction(field: &str) -> SortDirection {
        match field {
            Self::SORT_LAST_UPDATED => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Rows of the properties table
///
/// Listings that carry an update time, in collection order. When none do, every
/// listing is shown.
pub fn table_properties(records: &[Property]) -> Cow<'_, [Property]> {
    let dated = records.iter().filter(|p| p.data.updated_at.is_some()).count();
    if dated == 0 || dated == records.len() {
        Cow::Borrowed(records)
    } else {
        Cow::Owned(
            records
                .iter()
                .filter(|p| p.data.updated_at.is_some())
                .cloned()
                .collect(),
        )
    }
}

// ============================================================================
// Payments
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Deposit,
    Rent,
    LateFee,
    Utility,
    Damage,
    Refund,
}

impl PaymentType {
    pub const ALL: [PaymentType; 6] = [
        PaymentType::Deposit,
        PaymentType::Rent,
        PaymentType::LateFee,
        PaymentType::Utility,
        PaymentType::Damage,
        PaymentType::Refund,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentType::Deposit => "deposit",
            PaymentType::Rent => "rent",
            PaymentType::LateFee => "late_fee",
            PaymentType::Utility => "utility",
            PaymentType::Damage => "damage",
            PaymentType::Refund => "refund",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentType::Deposit => "Deposit",
            PaymentType::Rent => "Rent",
            PaymentType::LateFee => "Late Fee",
            PaymentType::Utility => "Utility",
            PaymentType::Damage => "Damage",
            PaymentType::Refund => "Refund",
        }
    }
}

impl FromStr for PaymentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s) || t.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant::new("payment type", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
    Refunded,
    Cancelled,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 5] = [
        PaymentStatus::Pending,
        PaymentStatus::Paid,
        PaymentStatus::Overdue,
        PaymentStatus::Refunded,
        PaymentStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Overdue => "overdue",
            PaymentStatus::Refunded => "refunded",
            PaymentStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant::new("payment status", s))
    }
}

/// A booking payment without its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub booking: i64,
    pub payment_type: PaymentType,
    pub month_number: u32,
    pub amount: String,
    pub due_date: String,
    pub status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
}

/// A booking payment, shown on the transactions screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: NewPayment,
}

impl Payment {
    pub const SORT_DUE_DATE: &'static str = "due_date";
    pub const SORT_AMOUNT: &'static str = "amount";

    /// Amount with currency symbol and thousands separators, e.g. "₵8,500.00"
    pub fn amount_display(&self) -> String {
        format_cedis(parse_number(&self.data.amount))
    }
}

impl Record for Payment {
    type Draft = NewPayment;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, data: NewPayment) -> Self {
        Self { id, data }
    }

    fn collection_name() -> &'static str {
        "estatery-payments"
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        let mut fields = vec![Cow::Owned(self.id.to_string())];
        if let Some(customer) = &self.data.customer {
            fields.push(Cow::Borrowed(customer.as_str()));
        }
        if let Some(title) = &self.data.property_title {
            fields.push(Cow::Borrowed(title.as_str()));
        }
        fields
    }

    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        let mut fields = HashMap::new();
        fields.insert("status".to_string(), self.data.status.as_str().into());
        fields.insert("payment_type".to_string(), self.data.payment_type.as_str().into());
        fields.insert("booking".to_string(), IndexValue::Int(self.data.booking));
        fields
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            Self::SORT_DUE_DATE => SortValue::Timestamp(parse_timestamp(Some(&self.data.due_date))),
            Self::SORT_AMOUNT => SortValue::Number(parse_number(&self.data.amount)),
            _ => SortValue::Number(0.0),
        }
    }

    fn default_direction(field: &str) -> SortDirection {
        match field {
            Self::SORT_DUE_DATE => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}

/// Format an amount as cedis with two decimals and comma grouping
pub fn format_cedis(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}₵{}.{}", sign, grouped, fraction)
}

// ============================================================================
// Leads
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LeadStage {
    New,
    Contacted,
    #[serde(rename = "Tour Scheduled")]
    TourScheduled,
    Negotiation,
    Closed,
}

impl LeadStage {
    /// Pipeline order
    pub const ALL: [LeadStage; 5] = [
        LeadStage::New,
        LeadStage::Contacted,
        LeadStage::TourScheduled,
        LeadStage::Negotiation,
        LeadStage::Closed,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LeadStage::New => "New",
            LeadStage::Contacted => "Contacted",
            LeadStage::TourScheduled => "Tour Scheduled",
            LeadStage::Negotiation => "Negotiation",
            LeadStage::Closed => "Closed",
        }
    }

    /// Next stage in the pipeline; `Closed` stays closed
    pub fn next(self) -> Self {
        match self {
            LeadStage::New => LeadStage::Contacted,
            LeadStage::Contacted => LeadStage::TourScheduled,
            LeadStage::TourScheduled => LeadStage::Negotiation,
            LeadStage::Negotiation | LeadStage::Closed => LeadStage::Closed,
        }
    }
}

impl FromStr for LeadStage {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| c.is_alphanumeric()).collect();
        Self::ALL
            .into_iter()
            .find(|stage| {
                let label: String = stage.label().chars().filter(|c| c.is_alphanumeric()).collect();
                label.eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| UnknownVariant::new("lead stage", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    Website,
    Referral,
    Ads,
}

impl LeadSource {
    pub fn label(self) -> &'static str {
        match self {
            LeadSource::Website => "Website",
            LeadSource::Referral => "Referral",
            LeadSource::Ads => "Ads",
        }
    }
}

/// A sales lead without its id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub property_id: RecordId,
    pub source: LeadSource,
    pub budget: String,
    pub stage: LeadStage,
    pub created_at: String,
}

/// A sales lead tied to a property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: RecordId,
    #[serde(flatten)]
    pub data: NewLead,
}

impl Lead {
    pub const SORT_CREATED: &'static str = "created_at";
    pub const SORT_NAME: &'static str = "name";

    /// Up to two upper-cased initials from the lead's name
    pub fn initials(&self) -> String {
        self.data
            .name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

impl Record for Lead {
    type Draft = NewLead;

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn from_draft(id: RecordId, data: NewLead) -> Self {
        Self { id, data }
    }

    fn collection_name() -> &'static str {
        "estatery-leads"
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Owned(self.id.to_string()),
            Cow::Borrowed(self.data.name.as_str()),
            Cow::Borrowed(self.data.email.as_str()),
        ]
    }

    fn indexed_fields(&self) -> HashMap<String, IndexValue> {
        let mut fields = HashMap::new();
        fields.insert("stage".to_string(), self.data.stage.label().into());
        fields.insert("source".to_string(), self.data.source.label().into());
        fields
    }

    fn sort_value(&self, field: &str) -> SortValue {
        match field {
            Self::SORT_CREATED => SortValue::Timestamp(parse_timestamp(Some(&self.data.created_at))),
            Self::SORT_NAME => SortValue::Text(self.data.name.to_lowercase()),
            _ => SortValue::Number(0.0),
        }
    }

    fn default_direction(field: &str) -> SortDirection {
        match field {
            Self::SORT_CREATED => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }
}
