// Built-in demo data used when durable storage has nothing usable

use crate::models::{
    Lead, LeadSource, LeadStage, NewLead, NewPayment, NewProperty, Payment, PaymentStatus, PaymentType, Property,
    PropertyImage, PropertyStatus, PropertyType,
};
use crate::quick_search::SearchResult;
use crate::record::{Record, RecordId};

struct SeedProperty {
    id: &'static str,
    title: &'static str,
    address: &'static str,
    city: &'static str,
    description: &'static str,
    daily_price: &'static str,
    monthly_price: &'static str,
    bedrooms: u32,
    bathrooms: u32,
    area: u32,
    property_type: PropertyType,
    min_stay_months: u32,
    listed_at: Option<&'static str>,
}

const PROPERTIES: [SeedProperty; 10] = [
    SeedProperty {
        id: "03483",
        title: "Seaside Retreat",
        address: "258 Coastline Dr",
        city: "Springfield",
        description: "Stunning lakefront estate with panoramic views.",
        daily_price: "19.17",
        monthly_price: "575.00",
        bedrooms: 5,
        bathrooms: 4,
        area: 4200,
        property_type: PropertyType::House,
        min_stay_months: 12,
        listed_at: Some("2025-07-08T00:00:00Z"),
    },
    SeedProperty {
        id: "03484",
        title: "Mountain Escape",
        address: "123 Summit Ave",
        city: "Denver",
        description: "Architectural masterpiece on the coast.",
        daily_price: "40.00",
        monthly_price: "1200.00",
        bedrooms: 6,
        bathrooms: 5,
        area: 6500,
        property_type: PropertyType::Villa,
        min_stay_months: 6,
        listed_at: Some("2025-08-15T00:00:00Z"),
    },
    SeedProperty {
        id: "03485",
        title: "Urban Loft",
        address: "456 City Center",
        city: "New York",
        description: "Luxury penthouse in the heart of the city.",
        daily_price: "83.33",
        monthly_price: "2500.00",
        bedrooms: 4,
        bathrooms: 3,
        area: 3800,
        property_type: PropertyType::Apartment,
        min_stay_months: 24,
        listed_at: Some("2025-09-01T00:00:00Z"),
    },
    SeedProperty {
        id: "03486",
        title: "Countryside Villa",
        address: "789 Farm Rd",
        city: "Austin",
        description: "Industrial-chic loft with exposed brick.",
        daily_price: "28.33",
        monthly_price: "850.00",
        bedrooms: 2,
        bathrooms: 2,
        area: 2100,
        property_type: PropertyType::Studio,
        min_stay_months: 12,
        listed_at: Some("2025-07-20T00:00:00Z"),
    },
    SeedProperty {
        id: "03487",
        title: "Cozy Cabin",
        address: "321 Woodland Way",
        city: "Seattle",
        description: "Desert oasis with red rock views.",
        daily_price: "21.67",
        monthly_price: "650.00",
        bedrooms: 4,
        bathrooms: 4,
        area: 3600,
        property_type: PropertyType::House,
        min_stay_months: 6,
        listed_at: Some("2025-06-30T00:00:00Z"),
    },
    SeedProperty {
        id: "6",
        title: "Oceanfront Paradise",
        address: "Miami Beach",
        city: "Florida",
        description: "Direct oceanfront with private dock.",
        daily_price: "4833.33",
        monthly_price: "145000.00",
        bedrooms: 7,
        bathrooms: 6,
        area: 8200,
        property_type: PropertyType::Villa,
        min_stay_months: 12,
        listed_at: None,
    },
    SeedProperty {
        id: "7",
        title: "Mountain View Lodge",
        address: "Aspen",
        city: "Colorado",
        description: "Ski-in/ski-out luxury lodge.",
        daily_price: "30666.67",
        monthly_price: "920000.00",
        bedrooms: 5,
        bathrooms: 5,
        area: 5400,
        property_type: PropertyType::House,
        min_stay_months: 24,
        listed_at: None,
    },
    SeedProperty {
        id: "8",
        title: "Garden District Home",
        address: "New Orleans",
        city: "LA",
        description: "Historic charm with modern updates.",
        daily_price: "18833.33",
        monthly_price: "565000.00",
        bedrooms: 4,
        bathrooms: 3,
        area: 3200,
        property_type: PropertyType::House,
        min_stay_months: 12,
        listed_at: None,
    },
    SeedProperty {
        id: "9",
        title: "Desert Oasis Estate",
        address: "Scottsdale",
        city: "Arizona",
        description: "Contemporary desert estate.",
        daily_price: "36666.67",
        monthly_price: "1100000.00",
        bedrooms: 5,
        bathrooms: 4,
        area: 4800,
        property_type: PropertyType::Villa,
        min_stay_months: 24,
        listed_at: None,
    },
    SeedProperty {
        id: "10",
        title: "Historic Brownstone",
        address: "Brooklyn",
        city: "New York",
        description: "Restored brownstone with original details.",
        daily_price: "24500.00",
        monthly_price: "735000.00",
        bedrooms: 3,
        bathrooms: 3,
        area: 2800,
        property_type: PropertyType::Condo,
        min_stay_months: 12,
        listed_at: None,
    },
];

/// Demo property listings, all available and priced in cedis
pub fn properties() -> Vec<Property> {
    PROPERTIES
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let data = NewProperty {
                title: seed.title.to_string(),
                address: seed.address.to_string(),
                city: seed.city.to_string(),
                state: None,
                country: "USA".to_string(),
                zip_code: None,
                description: seed.description.to_string(),
                daily_price: seed.daily_price.to_string(),
                monthly_price: seed.monthly_price.to_string(),
                currency: "ghs".to_string(),
                bedrooms: seed.bedrooms,
                bathrooms: seed.bathrooms,
                area: seed.area,
                property_type: seed.property_type,
                status: PropertyStatus::Available,
                has_wifi: None,
                has_parking: None,
                has_pool: None,
                has_gym: None,
                is_furnished: None,
                has_kitchen: None,
                min_stay_months: Some(seed.min_stay_months),
                max_stay_months: None,
                images: Vec::new(),
                primary_image: Some(PropertyImage {
                    image: format!("/images/property-{}.webp", i + 1),
                    is_primary: None,
                }),
                created_at: seed.listed_at.map(str::to_string),
                updated_at: seed.listed_at.map(str::to_string),
            };
            Property::from_draft(RecordId::from(seed.id), data)
        })
        .collect()
}

#[rustfmt::skip]
const PAYMENTS: [(i64, i64, PaymentType, u32, &str, &str, PaymentStatus, &str, &str); 13] = [
    (23487, 101, PaymentType::Rent, 1, "293.00", "2025-07-08", PaymentStatus::Paid, "Oak Grove Estates", "David Martinez"),
    (23488, 102, PaymentType::Rent, 2, "320.00", "2025-07-09", PaymentStatus::Paid, "Maple Heights", "Sarah Johnson"),
    (23489, 103, PaymentType::Rent, 1, "275.00", "2025-07-10", PaymentStatus::Pending, "Riverbend Apartments", "Michael Smith"),
    (23490, 104, PaymentType::Rent, 1, "450.00", "2025-07-11", PaymentStatus::Paid, "Sunset Terrace", "Emma Wilson"),
    (23491, 105, PaymentType::Deposit, 0, "8500.00", "2025-07-12", PaymentStatus::Paid, "Lakeside Villa", "James Brown"),
    (23492, 106, PaymentType::Rent, 3, "380.00", "2025-07-13", PaymentStatus::Pending, "Urban Heights", "Anna Davis"),
    (23493, 107, PaymentType::Rent, 2, "520.00", "2025-07-14", PaymentStatus::Paid, "Green Valley", "Chris Lee"),
    (23494, 108, PaymentType::Deposit, 0, "12000.00", "2025-07-15", PaymentStatus::Cancelled, "Harbor View", "Maria Garcia"),
    (23495, 109, PaymentType::Rent, 1, "610.00", "2025-07-16", PaymentStatus::Pending, "Park Place", "Tom Anderson"),
    (23496, 110, PaymentType::Rent, 4, "295.00", "2025-07-17", PaymentStatus::Paid, "Riverside", "Lisa Moore"),
    (23497, 111, PaymentType::Deposit, 0, "9200.00", "2025-07-18", PaymentStatus::Pending, "Hilltop Manor", "Paul Clark"),
    (23498, 112, PaymentType::Rent, 2, "720.00", "2025-07-19", PaymentStatus::Paid, "Downtown Loft", "Rachel Green"),
    (23499, 113, PaymentType::Rent, 1, "410.00", "2025-07-20", PaymentStatus::Paid, "Garden View", "Steve Adams"),
];

/// Demo booking payments for the transactions screen
pub fn payments() -> Vec<Payment> {
    PAYMENTS
        .iter()
        .map(|&(id, booking, payment_type, month_number, amount, due_date, status, title, customer)| {
            Payment::from_draft(
                RecordId::Num(id),
                NewPayment {
                    booking,
                    payment_type,
                    month_number,
                    amount: amount.to_string(),
                    due_date: due_date.to_string(),
                    status,
                    paid_date: None,
                    property_title: Some(title.to_string()),
                    customer: Some(customer.to_string()),
                },
            )
        })
        .collect()
}

#[rustfmt::skip]
const LEADS: [(&str, &str, &str, &str, LeadSource, &str, LeadStage, &str); 10] = [
    ("L-3421", "James Smith", "james.smith@example.com", "03483", LeadSource::Website, "₵600–₵800 / month", LeadStage::New, "2025-07-10"),
    ("L-3422", "Linda Johnson", "linda.johnson@example.com", "03484", LeadSource::Ads, "₵1,000–₵1,400 / month", LeadStage::Contacted, "2025-07-09"),
    ("L-3423", "Robert Brown", "robert.brown@example.com", "03485", LeadSource::Referral, "₵2,000–₵3,000 / month", LeadStage::TourScheduled, "2025-07-08"),
    ("L-3424", "Jessica Wilson", "jessica.wilson@example.com", "03486", LeadSource::Website, "₵700–₵900 / month", LeadStage::Negotiation, "2025-07-05"),
    ("L-3425", "Michael Taylor", "michael.taylor@example.com", "03487", LeadSource::Referral, "₵1,200–₵1,800 / month", LeadStage::Closed, "2025-07-02"),
    ("L-3426", "Emily Davis", "emily.d@example.com", "03483", LeadSource::Website, "₵550–₵700 / month", LeadStage::New, "2025-07-11"),
    ("L-3427", "Daniel White", "daniel.w@example.com", "03484", LeadSource::Ads, "₵1,100–₵1,300 / month", LeadStage::Contacted, "2025-07-10"),
    ("L-3428", "Sofia Martinez", "sofia.m@example.com", "03485", LeadSource::Referral, "₵2,200–₵2,800 / month", LeadStage::TourScheduled, "2025-07-09"),
    ("L-3429", "Kevin Harris", "kevin.h@example.com", "03486", LeadSource::Website, "₵780–₵950 / month", LeadStage::Negotiation, "2025-07-08"),
    ("L-3430", "Olivia King", "olivia.k@example.com", "03487", LeadSource::Referral, "₵1,400–₵1,700 / month", LeadStage::Closed, "2025-07-05"),
];

/// Demo sales leads, each tied to one of the first five properties
pub fn leads() -> Vec<Lead> {
    LEADS
        .iter()
        .map(|&(id, name, email, property_id, source, budget, stage, created_at)| {
            Lead::from_draft(
                RecordId::from(id),
                NewLead {
                    name: name.to_string(),
                    email: email.to_string(),
                    property_id: RecordId::from(property_id),
                    source,
                    budget: budget.to_string(),
                    stage,
                    created_at: created_at.to_string(),
                },
            )
        })
        .collect()
}

/// Navigation sections offered by quick search
pub fn sections() -> Vec<SearchResult> {
    [
        ("s1", "Dashboard", "/dashboard"),
        ("s2", "Agents", "/dashboard/agents"),
        ("s3", "Clients", "/clients/clients"),
        ("s4", "Properties", "/dashboard/properties"),
        ("s5", "Analytics", "/dashboard/analytics"),
        ("s6", "Recent Payments", "/dashboard"),
    ]
    .into_iter()
    .map(|(id, label, href)| SearchResult::section(id, label, href))
    .collect()
}

/// Agents offered by quick search
pub fn agents() -> Vec<SearchResult> {
    [
        ("a1", "Claudia Fairchild", "/dashboard/agents/a1"),
        ("a2", "Clara Withmore", "/dashboard/agents/a2"),
        ("a3", "Clarisa Stone", "/dashboard/agents/a3"),
        ("a4", "Jonathan Cruz", "/dashboard/agents/a4"),
        ("a5", "Sarah Lee", "/dashboard"),
    ]
    .into_iter()
    .map(|(id, label, href)| SearchResult::person(id, label, "Agent", href))
    .collect()
}
