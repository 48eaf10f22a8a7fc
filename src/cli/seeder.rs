//! Database seeding for demos and local development.
//!
//! Populates semesters, users with profiles, courses with prerequisite
//! chains, hostels with rooms, fee structures and a sample of registrations
//! and grades. A single bcrypt hash (cost 4 for speed) is reused for every
//! seeded account.

use bcrypt::hash;
use fake::Fake;
use fake::faker::name::en::Name;
use rand::Rng;
use rand::seq::SliceRandom;
use sqlx::PgPool;
use std::time::Instant;

use crate::modules::grades::model::LetterGrade;

#[derive(Clone)]
pub struct SeedConfig {
    pub lecturers: usize,
    pub students: usize,
    pub courses: usize,
    pub hostels: usize,
    pub rooms_per_hostel: usize,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            lecturers: 5,
            students: 30,
            courses: 12,
            hostels: 3,
            rooms_per_hostel: 10,
        }
    }
}

pub async fn seed_database(db: &PgPool, config: SeedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = Instant::now();

    println!("🌱 Seeding database...");
    println!(
        "   - {} lecturers, {} students, {} courses, {} hostels x {} rooms",
        config.lecturers, config.students, config.courses, config.hostels, config.rooms_per_hostel
    );

    // Hash once, reuse for every account
    let password_hash = hash("password123", 4)?;

    let semester_ids = seed_semesters(db).await?;
    let active_semester = semester_ids[0];

    let lecturer_ids = seed_lecturers(db, config.lecturers, &password_hash).await?;
    let student_ids = seed_students(db, config.students, &password_hash).await?;
    let course_ids = seed_courses(db, config.courses, active_semester, &lecturer_ids).await?;
    seed_prerequisites(db, &course_ids).await?;
    let hostel_ids = seed_hostels(db, config.hostels, config.rooms_per_hostel).await?;
    seed_fee_structures(db, &course_ids, &hostel_ids, active_semester).await?;
    let registrations = seed_registrations(db, &student_ids, &course_ids, active_semester).await?;
    seed_grades(db, db_grade_sample(&registrations), active_semester).await?;

    println!(
        "\n✅ Seeding complete! {} semesters, {} users, {} courses, {} hostels, {} registrations in {:?}",
        semester_ids.len(),
        lecturer_ids.len() + student_ids.len(),
        course_ids.len(),
        hostel_ids.len(),
        registrations.len(),
        start_time.elapsed()
    );
    println!("\n📝 Default password for all seeded users: password123");

    Ok(())
}

pub async fn clear_seeded_data(db: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    println!("🧹 Clearing seeded data (admin accounts are kept)...");

    // Child tables first
    for table in [
        "grades",
        "unit_registrations",
        "payments",
        "fee_clearances",
        "fee_structures",
        "student_room_bookings",
        "rooms",
        "hostels",
        "course_prerequisites",
        "assignments",
        "document_requests",
        "announcements",
        "audit_logs",
        "admission_applications",
        "courses",
        "semesters",
    ] {
        sqlx::query(&format!("DELETE FROM {table}")).execute(db).await?;
    }

    sqlx::query("DELETE FROM student_profiles").execute(db).await?;
    sqlx::query("DELETE FROM lecturer_profiles").execute(db).await?;
    sqlx::query("DELETE FROM users WHERE role <> 'admin'")
        .execute(db)
        .await?;

    println!("✅ Seeded data cleared");
    Ok(())
}

async fn seed_semesters(db: &PgPool) -> Result<Vec<i64>, sqlx::Error> {
    let mut ids = Vec::with_capacity(2);

    let current: i64 = sqlx::query_scalar(
        "INSERT INTO semesters (name, start_date, end_date, active)
         VALUES ('2025/2026 Semester 1', '2025-09-01', '2025-12-19', TRUE)
         RETURNING id",
    )
    .fetch_one(db)
    .await?;
    ids.push(current);

    let previous: i64 = sqlx::query_scalar(
        "INSERT INTO semesters (name, start_date, end_date, active)
         VALUES ('2024/2025 Semester 2', '2025-01-13', '2025-05-02', FALSE)
         RETURNING id",
    )
    .fetch_one(db)
    .await?;
    ids.push(previous);

    Ok(ids)
}

async fn seed_lecturers(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<i64>, sqlx::Error> {
    let departments = ["Computer Science", "Mathematics", "Physics", "Economics"];
    let mut profile_ids = Vec::with_capacity(count);

    for i in 0..count {
        let name: String = Name().fake();
        let email = format!("lecturer{}@campusgate.test", i + 1);
        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, 'lecturer') RETURNING id",
        )
        .bind(&name)
        .bind(&email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;

        let profile_id: i64 = sqlx::query_scalar(
            "INSERT INTO lecturer_profiles (user_id, staff_no, department)
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(format!("STF{:04}", i + 1))
        .bind(departments[i % departments.len()])
        .fetch_one(db)
        .await?;

        profile_ids.push(profile_id);
    }

    Ok(profile_ids)
}

async fn seed_students(
    db: &PgPool,
    count: usize,
    password_hash: &str,
) -> Result<Vec<i64>, sqlx::Error> {
    let programs = ["BSc Computer Science", "BSc Mathematics", "BA Economics"];
    let mut rng = rand::thread_rng();
    let mut profile_ids = Vec::with_capacity(count);

    for i in 0..count {
        let name: String = Name().fake();
        let email = format!("student{}@campusgate.test", i + 1);
        let user_id: i64 = sqlx::query_scalar(
            "INSERT INTO users (name, email, password_hash, role)
             VALUES ($1, $2, $3, 'student') RETURNING id",
        )
        .bind(&name)
        .bind(&email)
        .bind(password_hash)
        .fetch_one(db)
        .await?;

        let profile_id: i64 = sqlx::query_scalar(
            "INSERT INTO student_profiles (user_id, reg_no, program, year_of_study)
             VALUES ($1, $2, $3, $4) RETURNING id",
        )
        .bind(user_id)
        .bind(format!("REG/{:05}/25", i + 1))
        .bind(programs[i % programs.len()])
        .bind(rng.gen_range(1..=4))
        .fetch_one(db)
        .await?;

        profile_ids.push(profile_id);
    }

    Ok(profile_ids)
}

async fn seed_courses(
    db: &PgPool,
    count: usize,
    semester_id: i64,
    lecturer_ids: &[i64],
) -> Result<Vec<i64>, sqlx::Error> {
    let mut rng = rand::thread_rng();
    let mut ids = Vec::with_capacity(count);

    for i in 0..count {
        let lecturer = lecturer_ids.choose(&mut rng).copied();
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO courses (code, title, program, semester_id, lecturer_id)
             VALUES ($1, $2, 'BSc Computer Science', $3, $4) RETURNING id",
        )
        .bind(format!("CSC{}", 100 + i as i64 * 10))
        .bind(format!("Course Unit {}", i + 1))
        .bind(semester_id)
        .bind(lecturer)
        .fetch_one(db)
        .await?;
        ids.push(id);
    }

    Ok(ids)
}

/// Chain every third course onto the one before it so prerequisite paths
/// exist without cycles.
async fn seed_prerequisites(db: &PgPool, course_ids: &[i64]) -> Result<(), sqlx::Error> {
    for window in course_ids.windows(2).step_by(3) {
        sqlx::query(
            "INSERT INTO course_prerequisites (course_id, prerequisite_id)
             VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(window[1])
        .bind(window[0])
        .execute(db)
        .await?;
    }
    Ok(())
}

async fn seed_hostels(
    db: &PgPool,
    count: usize,
    rooms_per_hostel: usize,
) -> Result<Vec<i64>, sqlx::Error> {
    let mut rng = rand::thread_rng();
    let mut ids = Vec::with_capacity(count);

    for i in 0..count {
        let hostel_id: i64 = sqlx::query_scalar(
            "INSERT INTO hostels (name, location, capacity)
             VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(format!("Hall {}", (b'A' + i as u8) as char))
        .bind("Main Campus")
        .bind((rooms_per_hostel * 4) as i32)
        .fetch_one(db)
        .await?;

        for room in 0..rooms_per_hostel {
            let beds = rng.gen_range(2..=4);
            sqlx::query(
                "INSERT INTO rooms (hostel_id, room_number, bed_count, capacity, price_per_bed)
                 VALUES ($1, $2, $3, $3, $4)",
            )
            .bind(hostel_id)
            .bind(format!("{}{:02}", (b'A' + i as u8) as char, room + 1))
            .bind(beds)
            .bind(rng.gen_range(80..200) as f64)
            .execute(db)
            .await?;
        }

        ids.push(hostel_id);
    }

    Ok(ids)
}

async fn seed_fee_structures(
    db: &PgPool,
    course_ids: &[i64],
    hostel_ids: &[i64],
    semester_id: i64,
) -> Result<(), sqlx::Error> {
    let mut rng = rand::thread_rng();

    for &course_id in course_ids {
        for &hostel_id in hostel_ids {
            sqlx::query(
                "INSERT INTO fee_structures (course_id, hostel_id, semester_id, amount)
                 VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
            )
            .bind(course_id)
            .bind(hostel_id)
            .bind(semester_id)
            .bind(rng.gen_range(400..1200) as f64)
            .execute(db)
            .await?;
        }
    }

    Ok(())
}

async fn seed_registrations(
    db: &PgPool,
    student_ids: &[i64],
    course_ids: &[i64],
    semester_id: i64,
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    let mut rng = rand::thread_rng();
    let mut pairs = Vec::new();

    let Some((min_take, max_take)) = registration_sample_bounds(course_ids.len()) else {
        return Ok(pairs);
    };

    for &student_id in student_ids {
        let take = rng.gen_range(min_take..=max_take);
        let mut courses = course_ids.to_vec();
        courses.shuffle(&mut rng);

        for &course_id in courses.iter().take(take) {
            sqlx::query(
                "INSERT INTO unit_registrations (student_id, course_id, semester_id)
                 VALUES ($1, $2, $3) ON CONFLICT DO NOTHING",
            )
            .bind(student_id)
            .bind(course_id)
            .bind(semester_id)
            .execute(db)
            .await?;
            pairs.push((student_id, course_id));
        }
    }

    Ok(pairs)
}

/// How many registrations to give each student: 2 to 4, shrunk to whatever
/// the catalogue actually holds. `None` when there are no courses at all.
fn registration_sample_bounds(available: usize) -> Option<(usize, usize)> {
    let max = available.min(4);
    if max == 0 {
        return None;
    }
    Some((max.min(2), max))
}

fn db_grade_sample(registrations: &[(i64, i64)]) -> Vec<(i64, i64)> {
    // Grade roughly half of the seeded registrations
    registrations
        .iter()
        .step_by(2)
        .copied()
        .collect()
}

async fn seed_grades(
    db: &PgPool,
    pairs: Vec<(i64, i64)>,
    semester_id: i64,
) -> Result<(), sqlx::Error> {
    let mut rng = rand::thread_rng();

    for (student_profile_id, course_id) in pairs {
        // Grades are recorded against the user, not the profile
        let user_id: Option<i64> =
            sqlx::query_scalar("SELECT user_id FROM student_profiles WHERE id = $1")
                .bind(student_profile_id)
                .fetch_optional(db)
                .await?;

        let Some(user_id) = user_id else { continue };

        let grade = LetterGrade::ALL.choose(&mut rng).copied().unwrap_or(LetterGrade::B);

        sqlx::query(
            "INSERT INTO grades (student_id, course_id, semester_id, grade)
             VALUES ($1, $2, $3, $4) ON CONFLICT DO NOTHING",
        )
        .bind(user_id)
        .bind(course_id)
        .bind(semester_id)
        .bind(grade.as_str())
        .execute(db)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_bounds_shrink_with_a_small_catalogue() {
        assert_eq!(registration_sample_bounds(0), None);
        assert_eq!(registration_sample_bounds(1), Some((1, 1)));
        assert_eq!(registration_sample_bounds(2), Some((2, 2)));
        assert_eq!(registration_sample_bounds(3), Some((2, 3)));
        assert_eq!(registration_sample_bounds(12), Some((2, 4)));
    }
}
