use std::fmt;

use academy_core::model::{
    CourseDraft, CourseLevel, Lesson, LessonId, Profile, Role, UserId,
};
use chrono::{DateTime, Duration, Utc};
use storage::repository::Storage;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    admin_id: UserId,
    admin_name: String,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidAdminId { raw: String },
    InvalidDbUrl { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidAdminId { raw } => {
                write!(f, "invalid --admin-id value (expected UUID): {raw}")
            }
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url =
            std::env::var("ACADEMY_DB_URL").unwrap_or_else(|_| "sqlite:dev.sqlite3".into());
        let mut admin_id = match std::env::var("ACADEMY_USER_ID") {
            Ok(raw) => raw
                .parse::<UserId>()
                .map_err(|_| ArgsError::InvalidAdminId { raw: raw.clone() })?,
            Err(_) => UserId::random(),
        };
        let mut admin_name =
            std::env::var("ACADEMY_ADMIN_NAME").unwrap_or_else(|_| "Admin".into());
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--admin-id" => {
                    let value = require_value(&mut args, "--admin-id")?;
                    admin_id = value
                        .parse::<UserId>()
                        .map_err(|_| ArgsError::InvalidAdminId { raw: value.clone() })?;
                }
                "--admin-name" => {
                    admin_name = require_value(&mut args, "--admin-name")?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            admin_id,
            admin_name,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite:dev.sqlite3)");
    eprintln!("  --admin-id <uuid>         User id of the seeded admin (default: random)");
    eprintln!("  --admin-name <name>       Display name of the seeded admin (default: Admin)");
    eprintln!("  --now <rfc3339>           Fixed current time for deterministic seeding");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  ACADEMY_DB_URL, ACADEMY_USER_ID, ACADEMY_ADMIN_NAME");
}

struct SeedCourse {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    level: CourseLevel,
    featured: bool,
    extra: bool,
    lessons: [&'static str; 4],
}

const SEED_COURSES: [SeedCourse; 8] = [
    SeedCourse {
        title: "Course 1: Faceless Channel Fundamentals",
        description: "Learn the core ideas behind faceless channels and how they work on YouTube.",
        category: "fundamentos",
        level: CourseLevel::Beginner,
        featured: true,
        extra: false,
        lessons: [
            "What a faceless channel is and why it works",
            "The most profitable and least crowded niches",
            "Choosing a niche by CPM and demand",
            "Real examples of successful faceless channels",
        ],
    },
    SeedCourse {
        title: "Course 2: Creating Your Channel",
        description: "Step by step guide to creating and configuring a channel from scratch.",
        category: "criacao-canal",
        level: CourseLevel::Beginner,
        featured: false,
        extra: false,
        lessons: [
            "Creating a Google account from scratch",
            "Full channel setup: name, logo and banner",
            "Visual identity tools",
            "YouTube settings and good practices",
        ],
    },
    SeedCourse {
        title: "Course 3: Content Production",
        description: "Master engaging content without appearing on camera.",
        category: "criacao-canal",
        level: CourseLevel::Intermediate,
        featured: false,
        extra: false,
        lessons: [
            "Where to find ideas and ready-made scripts",
            "Writing scripts with AI",
            "Narrating without appearing on camera",
            "Royalty-free image and video libraries",
        ],
    },
    SeedCourse {
        title: "Course 4: Video Editing",
        description: "Professional editing techniques that keep the audience engaged.",
        category: "criacao-canal",
        level: CourseLevel::Intermediate,
        featured: false,
        extra: false,
        lessons: [
            "Getting started with a video editor",
            "Dynamic cuts and automatic captions",
            "Effects and transitions for retention",
            "Quality settings for YouTube",
        ],
    },
    SeedCourse {
        title: "Course 5: Strategic Publishing",
        description: "Advanced strategies to maximise the reach of every video.",
        category: "geral",
        level: CourseLevel::Intermediate,
        featured: false,
        extra: false,
        lessons: [
            "Publishing the right way: title, description and tags",
            "Designing attractive thumbnails",
            "The best times to publish",
            "Playlists and end screens for retention",
        ],
    },
    SeedCourse {
        title: "Course 6: Growth and the Algorithm",
        description: "How the recommendation algorithm works and how to use it.",
        category: "geral",
        level: CourseLevel::Advanced,
        featured: true,
        extra: false,
        lessons: [
            "How the algorithm recommends videos",
            "Raising click-through rate and retention",
            "YouTube SEO: keywords and trends",
            "Shorts versus long videos",
        ],
    },
    SeedCourse {
        title: "Course 7: Monetization and Scale",
        description: "Turn your videos into a consistent source of income.",
        category: "monetizacao",
        level: CourseLevel::Advanced,
        featured: false,
        extra: false,
        lessons: [
            "Monetization requirements",
            "Raising your CPM",
            "Other income: affiliates and digital products",
            "Scaling with multiple channels",
        ],
    },
    SeedCourse {
        title: "Extra Course: Hacks and Secrets",
        description: "Advanced techniques professionals use to speed up results.",
        category: "geral",
        level: CourseLevel::Advanced,
        featured: false,
        extra: true,
        lessons: [
            "Producing videos in bulk with automation",
            "Using AI to speed up production",
            "Copyright-free music sources",
            "Avoiding strikes and bans",
        ],
    },
];

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);

    let admin = Profile::new(args.admin_id, Some(args.admin_name.clone()), now);
    storage.profiles.upsert_profile(&admin).await?;
    storage.roles.set_role(args.admin_id, Role::Admin).await?;

    let existing = storage.courses.list_published_courses().await?;
    if !existing.is_empty() {
        println!(
            "Catalog already holds {} courses; updated admin {} in {}",
            existing.len(),
            args.admin_id,
            args.db_url
        );
        return Ok(());
    }

    let mut next_lesson_id = 1_u64;
    for (offset, seed) in (0_i64..).zip(SEED_COURSES.iter()) {
        let draft = CourseDraft {
            category: Some(seed.category.to_string()),
            level: Some(seed.level),
            is_featured: seed.featured,
            is_extra: seed.extra,
            duration_minutes: Some(60),
            ..CourseDraft::new(seed.title, seed.description)
        };
        let created_at = now + Duration::minutes(offset);
        let new_course = draft.validate(args.admin_id, created_at)?;
        let course = storage.courses.insert_new_course(&new_course).await?;

        for (order_index, title) in (1_u32..).zip(seed.lessons.iter()) {
            let lesson = Lesson::new(
                LessonId::new(next_lesson_id),
                course.id(),
                *title,
                order_index,
            )?;
            storage.lessons.upsert_lesson(&lesson).await?;
            next_lesson_id += 1;
        }
    }

    println!(
        "Seeded {} courses with {} lessons and admin {} into {}",
        SEED_COURSES.len(),
        next_lesson_id - 1,
        args.admin_id,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
