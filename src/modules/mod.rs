pub mod admissions;
pub mod announcements;
pub mod assignments;
pub mod audit;
pub mod auth;
pub mod courses;
pub mod documents;
pub mod fees;
pub mod grades;
pub mod hostels;
pub mod registrations;
pub mod semesters;
pub mod users;
