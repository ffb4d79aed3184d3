//! `vedavayu` command-line client.
//!
//! Composition root: resolves origins, picks a session store, wires the
//! navigation hooks to the terminal, and runs one command against the API.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;

use vedavayu_client::api::types::{DoctorFilter, LoginRequest, SignupRequest, StatField};
use vedavayu_client::api::{
    about, auth, banners, doctors, gallery, partners, services, statistics, users, ApiClient,
    ApiError, FilePart, MultipartForm, Navigator, RedirectHooks,
};
use vedavayu_client::health::{HealthMonitor, HttpHealthProbe};
use vedavayu_client::local_store::LocalStore;
use vedavayu_client::media::{image_url, optimize_cloudinary_url, Crop};
use vedavayu_client::reports::{ReportError, ReportLog};
use vedavayu_client::session::{
    is_admin_authenticated, KeychainSessionStore, LocalSessionStore, SessionError, SessionStore,
};
use vedavayu_client::ClientConfig;

#[derive(Parser, Debug)]
#[command(name = "vedavayu", about = "Vedavayu clinic site client")]
struct Args {
    /// API origin (overrides VITE_API_BASE_URL / REACT_APP_API_BASE_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Local store file (default: <data dir>/vedavayu/local_store.json)
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Keep the session in the OS keychain instead of the local store
    #[arg(long, global = true)]
    keychain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and store the session
    Login {
        /// Defaults to the remembered email
        #[arg(long)]
        email: Option<String>,
        #[arg(long, env = "VEDAVAYU_PASSWORD")]
        password: String,
        /// Remember the email for the next login
        #[arg(long)]
        remember: bool,
    },
    /// Create an account and store the session
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long, env = "VEDAVAYU_PASSWORD")]
        password: String,
    },
    /// Clear the stored session
    Logout,
    /// Show the stored session user
    Whoami,
    /// Check backend health (primary, then fallback)
    Health {
        /// Keep polling until interrupted
        #[arg(long)]
        watch: bool,
    },
    Doctors {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        specialty: Option<String>,
    },
    DoctorAdd {
        #[arg(long)]
        name: String,
        #[arg(long)]
        specialty: String,
        #[arg(long)]
        image: PathBuf,
    },
    Services,
    Partners,
    Banners,
    Gallery,
    GalleryUpload {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Users,
    About,
    Stats,
    /// Set one statistics counter (patientsTreated, testReports, hoursSupport, recoveryRate)
    StatsSet { field: String, value: f64 },
    /// Increase one statistics counter by one and log it
    StatsBump { field: String },
    /// Show the local admin audit log
    Reports,
    Delete {
        #[arg(value_enum)]
        resource: Resource,
        id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Resource {
    Doctor,
    Service,
    Partner,
    Banner,
    Gallery,
    User,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Terminal stand-in for browser navigation.
struct CliNavigator;

impl Navigator for CliNavigator {
    fn alert(&self, text: &str) {
        eprintln!("{}", text);
    }

    fn navigate(&self, target: &str) {
        log::info!("Navigate to {}", target);
        eprintln!("Redirect: {}", target);
    }
}

struct App {
    config: ClientConfig,
    local: Arc<LocalStore>,
    client: ApiClient,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    env_logger::init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(ref url) = args.api_url {
        config = config.with_api_origin(url);
    }
    log::debug!("API base URL: {}", config.api_base_url());

    let store_path = args.store.clone().unwrap_or_else(LocalStore::default_path);
    let local = match LocalStore::open(&store_path) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            eprintln!("Cannot open local store {}: {}", store_path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let session: Arc<dyn SessionStore> = if args.keychain {
        Arc::new(KeychainSessionStore::new())
    } else {
        Arc::new(LocalSessionStore::new(local.clone()))
    };
    let hooks = Arc::new(RedirectHooks::new(CliNavigator));
    let client = ApiClient::new(&config, session, hooks);

    let app = App {
        config,
        local,
        client,
    };

    match run(&app, args.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(app: &App, command: Command) -> Result<(), CliError> {
    let client = &app.client;

    match command {
        Command::Login {
            email,
            password,
            remember,
        } => {
            let email = email
                .or_else(|| auth::remembered_email(&app.local))
                .ok_or_else(|| CliError::Usage("--email is required".to_string()))?;
            let resp = auth::login(
                client,
                &LoginRequest {
                    email: email.clone(),
                    password,
                },
            )
            .await?;
            if let Err(e) = auth::remember_email(&app.local, &email, remember) {
                log::warn!("Failed to update remembered email: {}", e);
            }
            println!(
                "Logged in as {} ({:?})",
                resp.user.display_name(),
                resp.user.role
            );
        }
        Command::Signup {
            first_name,
            last_name,
            email,
            phone,
            password,
        } => {
            let resp = auth::signup(
                client,
                &SignupRequest {
                    first_name,
                    last_name,
                    email,
                    phone,
                    password,
                },
            )
            .await?;
            println!("Account created for {}", resp.user.display_name());
        }
        Command::Logout => {
            auth::logout(client)?;
            println!("Logged out");
        }
        Command::Whoami => match client.session().get()? {
            Some(session) => {
                let name = session
                    .user
                    .as_ref()
                    .map(|u| u.display_name())
                    .unwrap_or_else(|| "(unknown user)".to_string());
                let admin = if is_admin_authenticated(client.session()) {
                    " [admin]"
                } else {
                    ""
                };
                println!("{}{}", name, admin);
            }
            None => println!("Not logged in"),
        },
        Command::Health { watch } => {
            let (mut monitor, _trigger) =
                HealthMonitor::new(HttpHealthProbe::new(), &app.config);
            if watch {
                let status = monitor.status();
                tokio::select! {
                    _ = monitor.run() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                println!("{}", status.read().await.label());
            } else {
                monitor.check().await;
                println!("{}", monitor.status().read().await.label());
            }
        }
        Command::Doctors { name, specialty } => {
            let filter = DoctorFilter { name, specialty };
            for doctor in doctors::fetch_doctors(client, &filter).await? {
                let image = optimize_cloudinary_url(
                    &image_url(&app.config.api_origin, &doctor.image),
                    Some(300),
                    Some(300),
                    Crop::Fill,
                );
                println!("{}\t{}\t{}\t{}", doctor.id, doctor.name, doctor.specialty, image);
            }
        }
        Command::DoctorAdd {
            name,
            specialty,
            image,
        } => {
            let form = MultipartForm::new()
                .text("name", name)
                .text("specialty", specialty)
                .file(FilePart::from_path("image", &image).await?);
            let doctor = doctors::create_doctor(client, form).await?;
            record(app, "Added new doctor", "Doctors");
            println!("Created doctor {}", doctor.id);
        }
        Command::Services => {
            for service in services::fetch_services(client).await? {
                println!("{}\t{}\t{}", service.id, service.name, service.description);
            }
        }
        Command::Partners => {
            for partner in partners::fetch_partners(client).await? {
                println!(
                    "{}\t{}\t{}",
                    partner.id,
                    partner.name,
                    image_url(&app.config.api_origin, &partner.logo)
                );
            }
        }
        Command::Banners => {
            for banner in banners::fetch_banners(client).await? {
                println!(
                    "{}\t{}\t{} {}\t{}",
                    banner.id, banner.title, banner.date, banner.time, banner.registration_link
                );
            }
        }
        Command::Gallery => {
            for image in gallery::fetch_gallery(client).await? {
                println!(
                    "{}\t{}\t{}",
                    image.id,
                    image.title.as_deref().unwrap_or("-"),
                    image_url(&app.config.api_origin, &image.url)
                );
            }
        }
        Command::GalleryUpload {
            file,
            title,
            description,
        } => {
            let form = MultipartForm::new()
                .text_opt("title", title)
                .text_opt("description", description)
                .file(FilePart::from_path("image", &file).await?);
            let image = gallery::upload_gallery_image(client, form).await?;
            record(app, "Added new image", "Gallery");
            println!("Uploaded {}", image_url(&app.config.api_origin, &image.url));
        }
        Command::Users => {
            for user in users::fetch_users(client).await? {
                println!("{}\t{}\t{}\t{:?}", user.id, user.name, user.email, user.role);
            }
        }
        Command::About => {
            let info = about::fetch_about(client).await?;
            println!("{}\n\n{}", info.title, info.content);
            if let Some(mission) = info.mission {
                println!("\nMission: {}", mission);
            }
            if let Some(vision) = info.vision {
                println!("Vision: {}", vision);
            }
        }
        Command::Stats => {
            let stats = statistics::fetch_statistics(client).await?;
            println!("patientsTreated\t{}", stats.patients_treated);
            println!("testReports\t{}", stats.test_reports);
            println!("hoursSupport\t{}", stats.hours_support);
            println!("recoveryRate\t{}", stats.recovery_rate);
        }
        Command::StatsSet { field, value } => {
            let stat = parse_stat(&field)?;
            let update = stat.update(value).ok_or_else(|| {
                let expected = if stat.is_integral() {
                    "a non-negative whole number"
                } else {
                    "a non-negative number"
                };
                CliError::Usage(format!("{} must be {}, got {}", field, expected, value))
            })?;
            match statistics::update_statistics(client, &update).await? {
                Some(_) => {
                    let action = format!("Updated statistics: {} to {}", field, value);
                    record(app, &action, "Statistics");
                    println!("Updated {}", field);
                }
                None => println!("Statistics update was not accepted"),
            }
        }
        Command::StatsBump { field } => {
            let stat = parse_stat(&field)?;
            let mut reports = ReportLog::open(app.local.clone());
            let stats = reports
                .record_with_stat(client, &format!("Incremented {}", field), "Statistics", stat)
                .await?;
            println!("Incremented {} to {}", field, stat.read(&stats));
        }
        Command::Reports => {
            for report in ReportLog::open(app.local.clone()).entries() {
                println!(
                    "{}\t{}\t{}\t{}",
                    report.timestamp, report.section, report.user, report.action
                );
            }
        }
        Command::Delete { resource, id } => {
            let (ack, action, section) = match resource {
                Resource::Doctor => (
                    doctors::delete_doctor(client, &id).await?,
                    "Deleted doctor",
                    "Doctors",
                ),
                Resource::Service => (
                    services::delete_service(client, &id).await?,
                    "Deleted service",
                    "Services",
                ),
                Resource::Partner => (
                    partners::delete_partner(client, &id).await?,
                    "Removed partner",
                    "Partners",
                ),
                Resource::Banner => (
                    banners::delete_banner(client, &id).await?,
                    "Deleted banner",
                    "Banners",
                ),
                Resource::Gallery => (
                    gallery::delete_gallery_image(client, &id).await?,
                    "Deleted image",
                    "Gallery",
                ),
                Resource::User => (
                    users::delete_user(client, &id).await?,
                    "Deleted user",
                    "Users",
                ),
            };
            record(app, action, section);
            println!("{}", ack.message.unwrap_or_else(|| format!("Deleted {}", id)));
        }
    }

    Ok(())
}

fn parse_stat(field: &str) -> Result<StatField, CliError> {
    StatField::parse(field)
        .ok_or_else(|| CliError::Usage(format!("Unknown statistics field: {}", field)))
}

/// Append to the local audit log; failures are logged, never fatal.
fn record(app: &App, action: &str, section: &str) {
    let mut reports = ReportLog::open(app.local.clone());
    if let Err(e) = reports.record(action, section) {
        log::warn!("Failed to persist report: {}", e);
    }
}
