use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use estatery::config::Config;
use estatery::csv;
use estatery::draft::{ContactField, PropertyForm};
use estatery::filter::FilterChoice;
use estatery::models::{
    Lead, LeadStage, Payment, PaymentStatus, PaymentType, Property, PropertyStatus, PropertyType, table_properties,
};
use estatery::pipeline::{Pagination, apply_query, compute_visible_slice};
use estatery::quick_search::{QuickSearchIndex, ResultKind};
use estatery::seed;
use estatery::settings::{Notification, NotificationSettings, PreferenceStore, ProfileUpdate, UserProfile};
use estatery::store::RecordStore;
use estatery::view::ViewState;
use eyre::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

#[derive(Parser)]
#[command(name = "estatery")]
#[command(about = "Estatery CLI - property, payment and lead lists with quick search")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the config file (default: $XDG_CONFIG_HOME/estatery/estatery.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Storage location, overriding the config file
    #[arg(short, long)]
    store_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum PropertySort {
    Updated,
    Price,
}

impl PropertySort {
    fn field(self) -> &'static str {
        match self {
            PropertySort::Updated => Property::SORT_LAST_UPDATED,
            PropertySort::Price => Property::SORT_PRICE,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List properties
    Properties {
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "type")]
        property_type: Option<PropertyType>,
        #[arg(long)]
        status: Option<PropertyStatus>,
        /// Sort key (default: updated, newest first)
        #[arg(long, value_enum)]
        sort: Option<PropertySort>,
        /// Flip the sort key's default direction
        #[arg(long)]
        reverse: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// List payments, newest due date first
    Payments {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<PaymentStatus>,
        #[arg(long = "type")]
        payment_type: Option<PaymentType>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// List leads
    Leads {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        stage: Option<LeadStage>,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    /// Show one property and related listings
    Show { id: String },

    /// Add a property
    AddProperty {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// Monthly price, e.g. "₵1,200" or "1200/month"
        #[arg(long)]
        price: Option<String>,
        #[arg(long = "type")]
        property_type: Option<PropertyType>,
        #[arg(long)]
        bedrooms: Option<u32>,
        #[arg(long)]
        bathrooms: Option<u32>,
        #[arg(long)]
        area: Option<u32>,
        /// "6 months", "1 year" or "2 years"
        #[arg(long)]
        period: Option<String>,
        #[arg(long)]
        contact_email: Option<String>,
    },

    /// Quick search across sections, agents and properties
    Search { query: String },

    /// Export payments as CSV
    ExportPayments {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<PaymentStatus>,
        #[arg(long = "type")]
        payment_type: Option<PaymentType>,
        /// Output file (default: transactions-<date>.csv, "-" for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import payments from CSV
    ImportPayments { file: PathBuf },

    /// Show or change notification settings
    Notifications {
        #[arg(long)]
        enable: Vec<Notification>,
        #[arg(long)]
        disable: Vec<Notification>,
    },

    /// Show or change the user profile
    Profile {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
}

fn main() -> Result<()> {
    // Setup tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(path) = cli.store_path {
        config.storage.path = Some(path);
    }

    let storage = config.open_storage_or_unavailable();

    match cli.command {
        Commands::Properties {
            search,
            property_type,
            status,
            sort,
            reverse,
            page,
        } => {
            let store = RecordStore::open(storage, seed::properties());
            let mut view = match sort {
                Some(sort) => {
                    let mut view = ViewState::new();
                    view.select_sort_for::<Property>(sort.field());
                    view
                }
                None => Property::table_view(),
            };
            if reverse && let Some(field) = view.sort().map(|spec| spec.field.clone()) {
                view.select_sort_for::<Property>(&field);
            }
            if let Some(search) = search {
                view.set_search(search);
            }
            if let Some(t) = property_type {
                view.set_filter("property_type", FilterChoice::Is(t.as_str().into()));
            }
            if let Some(s) = status {
                view.set_filter("status", FilterChoice::Is(s.as_str().into()));
            }
            view.set_page(page);

            let rows = table_properties(store.records());
            let slice = compute_visible_slice(&*rows, &view, config.pages.properties);
            if slice.is_empty() {
                println!("{}", "No properties found".dimmed());
            }
            for p in &slice.items {
                println!(
                    "{:>8}  {:<24} {:<10} {:<12} {}",
                    p.id.to_string().bold(),
                    p.data.title,
                    p.data.property_type.label(),
                    status_label(p.data.status),
                    p.data.price_display()
                );
            }
            print_pagination(&slice.pagination);
        }

        Commands::Payments {
            search,
            status,
            payment_type,
            page,
        } => {
            let store = RecordStore::open(storage, seed::payments());
            let mut view = payment_view(search, status, payment_type);
            view.set_page(page);

            let slice = compute_visible_slice(store.records(), &view, config.pages.payments);
            if slice.is_empty() {
                println!("{}", "No payments found".dimmed());
            }
            for p in &slice.items {
                println!(
                    "{:>8}  {}  {:<22} {:<16} {:<8} {:>12}  {}",
                    p.id.to_string().bold(),
                    p.data.due_date,
                    p.data.property_title.as_deref().unwrap_or("-"),
                    p.data.customer.as_deref().unwrap_or("-"),
                    p.data.payment_type.label(),
                    p.amount_display(),
                    p.data.status.as_str()
                );
            }
            print_pagination(&slice.pagination);
        }

        Commands::Leads { search, stage, page } => {
            let store = RecordStore::open(storage, seed::leads());
            let mut view = ViewState::new();
            if let Some(search) = search {
                view.set_search(search);
            }
            if let Some(stage) = stage {
                view.set_filter("stage", FilterChoice::Is(stage.label().into()));
            }
            view.set_page(page);

            let slice = compute_visible_slice(store.records(), &view, config.pages.leads);
            if slice.is_empty() {
                println!("{}", "No leads found".dimmed());
            }
            for lead in &slice.items {
                print_lead(lead);
            }
            print_pagination(&slice.pagination);
        }

        Commands::Show { id } => {
            let store = RecordStore::open(storage, seed::properties());
            let Some(property) = store.get_by_id(&id) else {
                println!("{} {}", "Property not found:".red(), id);
                return Ok(());
            };

            println!("{} {}", property.data.title.bold(), format!("#{}", property.id).dimmed());
            println!("  {}", property.data.location());
            println!("  {}  ({})", property.data.price_display(), property.data.rental_period_label());
            println!(
                "  {} · {} bd · {} ba · {} sqft · {}",
                property.data.property_type.label(),
                property.data.bedrooms,
                property.data.bathrooms,
                property.data.area,
                status_label(property.data.status)
            );
            if !property.data.description.is_empty() {
                println!("  {}", property.data.description);
            }
            println!("  {}", property.data.image().dimmed());

            let others = store.get_others(&id, config.related_limit);
            if !others.is_empty() {
                println!("\n{}", "Other properties".bold());
                for other in others {
                    println!("  {:>8}  {}", other.id.to_string().dimmed(), other.data.title);
                }
            }
        }

        Commands::AddProperty {
            title,
            description,
            address,
            city,
            country,
            price,
            property_type,
            bedrooms,
            bathrooms,
            area,
            period,
            contact_email,
        } => {
            let mut form = PropertyForm::new();
            if let Some(title) = title {
                form.title = title;
            }
            if let Some(description) = description {
                form.set_description(&description);
            }
            if let Some(price) = price {
                form.price = price;
            }
            if let Some(t) = property_type {
                form.property_type = t;
            }
            if let Some(period) = period {
                form.rental_period = period;
            }
            form.bedrooms = bedrooms.unwrap_or(form.bedrooms);
            form.bathrooms = bathrooms.unwrap_or(form.bathrooms);
            form.area = area.unwrap_or(form.area);
            if let Some(email) = contact_email {
                form.set_contact(ContactField::Email, &email);
            }

            let mut location = form.location_step();
            if let Some(address) = address {
                location.set_address(&address);
            }
            if let Some(city) = city {
                location.set_city(&city);
            }
            if let Some(country) = country {
                location.set_country(&country);
            }

            let mut store = RecordStore::open(storage, seed::properties());
            let added = store.add(form.build_draft(chrono::Utc::now()));
            println!(
                "{} {} ({})",
                "Added".green(),
                added.data.title.bold(),
                added.id.to_string().dimmed()
            );
        }

        Commands::Search { query } => {
            let store = RecordStore::open(storage, seed::properties());
            let index = QuickSearchIndex::default().with_limit(config.quick_search.limit);
            let results = index.search_all(&query, store.records());
            if results.is_empty() {
                println!("{}", "No results found".dimmed());
            }
            for r in results {
                let kind = match r.kind {
                    ResultKind::Section => "section".cyan(),
                    ResultKind::Person => "agent".magenta(),
                    ResultKind::Record => "property".green(),
                    ResultKind::Query => "query".normal(),
                };
                println!(
                    "{:<9} {:<28} {:<40} {}",
                    kind,
                    r.label,
                    r.subtitle.as_deref().unwrap_or(""),
                    r.href.as_deref().unwrap_or("").dimmed()
                );
            }
        }

        Commands::ExportPayments {
            search,
            status,
            payment_type,
            output,
        } => {
            let store = RecordStore::open(storage, seed::payments());
            let view = payment_view(search, status, payment_type);
            let rows = apply_query(store.records(), &view);
            let text = csv::export_payments(rows.iter().copied());

            let output =
                output.unwrap_or_else(|| PathBuf::from(csv::export_file_name(chrono::Local::now().date_naive())));
            if output.as_os_str() == "-" {
                println!("{}", text);
            } else {
                fs::write(&output, text).context(format!("Failed to write {}", output.display()))?;
                println!("{} {} payments to {}", "Exported".green(), rows.len(), output.display());
            }
        }

        Commands::ImportPayments { file } => {
            let text = fs::read_to_string(&file).context(format!("Failed to read {}", file.display()))?;
            let mut store = RecordStore::open(storage, seed::payments());
            let count = csv::import_payments(&mut store, &text, chrono::Local::now().date_naive())
                .wrap_err_with(|| format!("Failed to import {}", file.display()))?;
            println!("{} {} payments", "Imported".green(), count);
        }

        Commands::Notifications { enable, disable } => {
            let mut settings = PreferenceStore::<NotificationSettings>::open(storage);
            settings.edit(|n| {
                for which in &enable {
                    n.set(*which, true);
                }
                for which in &disable {
                    n.set(*which, false);
                }
            });
            if settings.is_dirty()
                && let Err(e) = settings.save()
            {
                warn!(error = %e, "Failed to save notification settings");
            }
            for which in Notification::ALL {
                let mark = if settings.get().get(which) { "on".green() } else { "off".red() };
                println!("{:<14} {:<26} {}", which.as_str(), which.label(), mark);
            }
        }

        Commands::Profile { username, email, phone } => {
            let mut profile = PreferenceStore::<UserProfile>::open(storage);
            let update = ProfileUpdate {
                username,
                email,
                phone,
                ..Default::default()
            };
            if !update.is_empty() {
                profile.update_profile(update);
            }
            print_profile(profile.get());
        }
    }

    Ok(())
}

fn payment_view(search: Option<String>, status: Option<PaymentStatus>, payment_type: Option<PaymentType>) -> ViewState {
    let mut view = ViewState::new();
    view.select_sort_for::<Payment>(Payment::SORT_DUE_DATE);
    if let Some(search) = search {
        view.set_search(search);
    }
    if let Some(s) = status {
        view.set_filter("status", FilterChoice::Is(s.as_str().into()));
    }
    if let Some(t) = payment_type {
        view.set_filter("payment_type", FilterChoice::Is(t.as_str().into()));
    }
    view
}

fn status_label(status: PropertyStatus) -> colored::ColoredString {
    match status {
        PropertyStatus::Available => status.label().green(),
        PropertyStatus::Rented => status.label().yellow(),
        PropertyStatus::Maintenance => status.label().red(),
    }
}

fn print_lead(lead: &Lead) {
    println!(
        "{:>7}  {:<3} {:<16} {:<28} {:<9} {:<24} {}",
        lead.id.to_string().bold(),
        lead.initials(),
        lead.data.name,
        lead.data.email,
        lead.data.source.label(),
        lead.data.budget,
        lead.data.stage.label().cyan()
    );
}

fn print_profile(profile: &UserProfile) {
    println!("{:<10} {}", "username".dimmed(), profile.username);
    println!("{:<10} {}", "email".dimmed(), profile.email);
    println!("{:<10} {}", "phone".dimmed(), profile.phone);
    println!("{:<10} {:?}", "type".dimmed(), profile.user_type);
}

fn print_pagination(pagination: &Pagination) {
    println!(
        "{}",
        format!(
            "Page {} of {} ({} total)",
            pagination.page, pagination.page_count, pagination.total
        )
        .dimmed()
    );
}
