// Five-step "add property" wizard producing a property draft

use crate::binding::Binding;
use crate::models::{NewProperty, PLACEHOLDER_IMAGE, PropertyImage, PropertyStatus, PropertyType};
use crate::record::parse_number;
use chrono::{DateTime, SecondsFormat, Utc};
use std::cell::RefCell;
use std::rc::Rc;

/// Characters counted for the description and full address fields
pub const TEXT_LIMIT: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    BasicInformation,
    LocationDetails,
    PropertyDetails,
    PhotosMedia,
    ContactInformation,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::BasicInformation,
        Step::LocationDetails,
        Step::PropertyDetails,
        Step::PhotosMedia,
        Step::ContactInformation,
    ];

    /// 1-based position shown in the step indicator
    pub fn number(self) -> usize {
        self as usize + 1
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::BasicInformation => "Basic Information",
            Step::LocationDetails => "Location Details",
            Step::PropertyDetails => "Property Details",
            Step::PhotosMedia => "Photos & Media",
            Step::ContactInformation => "Contact Information",
        }
    }

    pub fn next(self) -> Option<Step> {
        Self::ALL.get(self as usize + 1).copied()
    }

    pub fn previous(self) -> Option<Step> {
        (self as usize).checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

/// Address fields collected by the location step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationData {
    pub address: String,
    pub city: String,
    pub country: String,
}

impl Default for LocationData {
    fn default() -> Self {
        Self {
            address: String::new(),
            city: String::new(),
            country: "USA".to_string(),
        }
    }
}

/// Location step, usable on its own or wired into a parent form
#[derive(Debug)]
pub struct LocationStep {
    data: Binding<LocationData>,
}

impl LocationStep {
    pub fn standalone(initial: LocationData) -> Self {
        Self {
            data: Binding::standalone(initial),
        }
    }

    /// Read and write the parent's copy through `shared`
    pub fn controlled(shared: Rc<RefCell<LocationData>>) -> Self {
        let reader = Rc::clone(&shared);
        Self {
            data: Binding::controlled(move || reader.borrow().clone(), move |v| *shared.borrow_mut() = v),
        }
    }

    pub fn data(&self) -> LocationData {
        self.data.get()
    }

    pub fn set_address(&mut self, address: &str) {
        self.data.update(|d| d.address = address.to_string());
    }

    pub fn set_city(&mut self, city: &str) {
        self.data.update(|d| d.city = city.to_string());
    }

    pub fn set_country(&mut self, country: &str) {
        self.data.update(|d| d.country = country.to_string());
    }

    /// Address length for the counter, capped at `TEXT_LIMIT`
    pub fn address_length(&self) -> usize {
        self.data.get().address.chars().count().min(TEXT_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Phone,
    Email,
    Agent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub agent: String,
}

/// Rental periods offered by the form
pub const RENTAL_PERIODS: [&str; 3] = ["6 months", "1 year", "2 years"];

/// Minimum stay for a rental period label; anything unrecognised is a year
pub fn min_stay_for_period(period: &str) -> u32 {
    match period {
        "6 months" => 6,
        "2 years" => 24,
        _ => 12,
    }
}

/// State of the add-property wizard
#[derive(Debug)]
pub struct PropertyForm {
    step: Step,
    pub title: String,
    description: String,
    pub property_type: PropertyType,
    /// Free-form price text, e.g. "₵350,000" or "1200/month"
    pub price: String,
    pub rental_period: String,
    location: Rc<RefCell<LocationData>>,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area: u32,
    pub image_url: String,
    contact: Contact,
}

impl Default for PropertyForm {
    fn default() -> Self {
        Self {
            step: Step::BasicInformation,
            title: "Modern 3-Bedroom Family Home in Suburban Area".to_string(),
            description: String::new(),
            property_type: PropertyType::House,
            price: "₵350,000".to_string(),
            rental_period: "1 year".to_string(),
            location: Rc::new(RefCell::new(LocationData::default())),
            bedrooms: 3,
            bathrooms: 2,
            area: 2000,
            image_url: PLACEHOLDER_IMAGE.to_string(),
            contact: Contact::default(),
        }
    }
}

impl PropertyForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Advance one step; false when already on the last one
    pub fn next(&mut self) -> bool {
        match self.step.next() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    /// Go back one step; false when already on the first one
    pub fn back(&mut self) -> bool {
        match self.step.previous() {
            Some(step) => {
                self.step = step;
                true
            }
            None => false,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    /// Description length for the counter, capped at `TEXT_LIMIT`
    pub fn description_length(&self) -> usize {
        self.description.chars().count().min(TEXT_LIMIT)
    }

    /// Location step bound to this form's location
    pub fn location_step(&self) -> LocationStep {
        LocationStep::controlled(Rc::clone(&self.location))
    }

    pub fn location(&self) -> LocationData {
        self.location.borrow().clone()
    }

    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    pub fn set_contact(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::Name => &mut self.contact.name,
            ContactField::Phone => &mut self.contact.phone,
            ContactField::Email => &mut self.contact.email,
            ContactField::Agent => &mut self.contact.agent,
        };
        *slot = value.to_string();
    }

    /// Monthly price digits from the price text, "0" when there are none
    pub fn monthly_price(&self) -> String {
        let text = self.price.trim();
        let text = text.strip_suffix("/month").unwrap_or(text).trim();
        let digits: String = text.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
        if digits.is_empty() { "0".to_string() } else { digits }
    }

    /// Property draft from the current form state, stamped with `now`
    pub fn build_draft(&self, now: DateTime<Utc>) -> NewProperty {
        let monthly_price = self.monthly_price();
        let daily_price = format!("{:.2}", parse_number(&monthly_price) / 30.0);
        let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
        let location = self.location();

        NewProperty {
            title: self.title.clone(),
            address: non_empty_or(location.address, "Address to be added"),
            city: non_empty_or(location.city, "TBD"),
            state: None,
            country: non_empty_or(location.country, "USA"),
            zip_code: None,
            description: self.description.clone(),
            daily_price,
            monthly_price,
            currency: "ghs".to_string(),
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            area: self.area,
            property_type: self.property_type,
            status: PropertyStatus::Available,
            has_wifi: None,
            has_parking: None,
            has_pool: None,
            has_gym: None,
            is_furnished: None,
            has_kitchen: None,
            min_stay_months: Some(min_stay_for_period(&self.rental_period)),
            max_stay_months: None,
            images: Vec::new(),
            primary_image: Some(PropertyImage {
                image: self.image_url.clone(),
                is_primary: None,
            }),
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
        }
    }

    /// Back to step one with every field at its default
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() { fallback.to_string() } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 7, 21, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_step_navigation_is_bounded() {
        let mut form = PropertyForm::new();
        assert_eq!(form.step(), Step::BasicInformation);
        assert!(!form.back());

        for expected in 2..=5 {
            assert!(form.next());
            assert_eq!(form.step().number(), expected);
        }
        assert!(form.step().is_last());
        assert!(!form.next());
        assert_eq!(form.step(), Step::ContactInformation);

        assert!(form.back());
        assert_eq!(form.step(), Step::PhotosMedia);
        assert_eq!(form.step().label(), "Photos & Media");
    }

    #[test]
    fn test_default_draft() {
        let draft = PropertyForm::new().build_draft(now());
        assert_eq!(draft.title, "Modern 3-Bedroom Family Home in Suburban Area");
        assert_eq!(draft.monthly_price, "350000");
        assert_eq!(draft.daily_price, "11666.67");
        assert_eq!(draft.address, "Address to be added");
        assert_eq!(draft.city, "TBD");
        assert_eq!(draft.country, "USA");
        assert_eq!(draft.currency, "ghs");
        assert_eq!(draft.status, PropertyStatus::Available);
        assert_eq!(draft.min_stay_months, Some(12));
        assert_eq!(draft.created_at.as_deref(), Some("2025-07-21T09:30:00.000Z"));
        assert_eq!(draft.updated_at, draft.created_at);
        assert_eq!(draft.image(), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_price_text_parsing() {
        let mut form = PropertyForm::new();
        form.price = "1200/month".to_string();
        assert_eq!(form.monthly_price(), "1200");

        form.price = "$1,250.50 /month".to_string();
        assert_eq!(form.monthly_price(), "1250.50");
        assert_eq!(form.build_draft(now()).daily_price, "41.68");

        form.price = "call us".to_string();
        assert_eq!(form.monthly_price(), "0");
        assert_eq!(form.build_draft(now()).daily_price, "0.00");
    }

    #[test]
    fn test_rental_period_to_min_stay() {
        assert_eq!(min_stay_for_period("6 months"), 6);
        assert_eq!(min_stay_for_period("1 year"), 12);
        assert_eq!(min_stay_for_period("2 years"), 24);
        assert_eq!(min_stay_for_period("forever"), 12);
    }

    #[test]
    fn test_controlled_location_step_feeds_form() {
        let form = PropertyForm::new();
        let mut step = form.location_step();
        step.set_address("14 Palm Street");
        step.set_city("Accra");
        step.set_country("");

        let draft = form.build_draft(now());
        assert_eq!(draft.address, "14 Palm Street");
        assert_eq!(draft.city, "Accra");
        assert_eq!(draft.country, "USA");
    }

    #[test]
    fn test_standalone_location_step() {
        let mut step = LocationStep::standalone(LocationData::default());
        step.set_address(&"x".repeat(250));
        assert_eq!(step.address_length(), TEXT_LIMIT);
        assert_eq!(step.data().country, "USA");
    }

    #[test]
    fn test_description_and_contact() {
        let mut form = PropertyForm::new();
        form.set_description("Bright rooms");
        assert_eq!(form.description_length(), 12);
        form.set_description(&"d".repeat(300));
        assert_eq!(form.description_length(), TEXT_LIMIT);

        form.set_contact(ContactField::Email, "owner@example.com");
        form.set_contact(ContactField::Agent, "a2");
        assert_eq!(form.contact().email, "owner@example.com");
        assert_eq!(form.contact().agent, "a2");
    }

    #[test]
    fn test_reset() {
        let mut form = PropertyForm::new();
        form.next();
        form.title = "Changed".to_string();
        form.location_step().set_city("Kumasi");
        form.reset();

        assert_eq!(form.step(), Step::BasicInformation);
        assert_eq!(form.title, "Modern 3-Bedroom Family Home in Suburban Area");
        assert_eq!(form.location().city, "");
    }
}
