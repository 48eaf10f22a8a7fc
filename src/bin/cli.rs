use campusgate::cli::create_admin;
use campusgate::cli::seeder::{SeedConfig, clear_seeded_data, seed_database};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "campusgate-cli")]
#[command(about = "Campusgate CLI - Administrative tools for Campusgate", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an administrator account
    CreateAdmin {
        /// Full name of the administrator
        #[arg(short = 'n', long)]
        name: String,

        /// Email address
        #[arg(short = 'e', long)]
        email: String,

        /// Password
        #[arg(short = 'p', long)]
        password: String,
    },
    /// Seed the database with fake semesters, users, courses and hostels
    Seed {
        /// Number of lecturers to create
        #[arg(long, default_value = "5")]
        lecturers: usize,

        /// Number of students to create
        #[arg(long, default_value = "30")]
        students: usize,

        /// Number of courses to create
        #[arg(long, default_value = "12")]
        courses: usize,

        /// Number of hostels to create
        #[arg(long, default_value = "3")]
        hostels: usize,

        /// Number of rooms per hostel
        #[arg(long, default_value = "10")]
        rooms_per_hostel: usize,
    },
    /// Clear all seeded data (keeps admin accounts)
    ClearSeed,
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    let cli = Cli::parse();

    match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
        } => match create_admin(&pool, &name, &email, &password).await {
            Ok(_) => {
                println!("\n✅ Admin created successfully!");
                println!("   Email: {}", email);
                println!("   Name: {}", name);
            }
            Err(e) => {
                eprintln!("\n❌ Error creating admin: {}", e);
                std::process::exit(1);
            }
        },
        Commands::Seed {
            lecturers,
            students,
            courses,
            hostels,
            rooms_per_hostel,
        } => {
            let config = SeedConfig {
                lecturers,
                students,
                courses,
                hostels,
                rooms_per_hostel,
            };
            if let Err(e) = seed_database(&pool, config).await {
                eprintln!("\n❌ Error seeding database: {}", e);
                std::process::exit(1);
            }
        }
        Commands::ClearSeed => {
            if let Err(e) = clear_seeded_data(&pool).await {
                eprintln!("\n❌ Error clearing seeded data: {}", e);
                std::process::exit(1);
            }
        }
    }
}
