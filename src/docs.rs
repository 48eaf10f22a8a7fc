use utoipa::OpenApi;

use crate::modules::admissions::model::{
    AdmissionApplication, ApplicationStatus, DecideApplicationDto, SubmitApplicationDto,
};
use crate::modules::announcements::model::{
    Announcement, CreateAnnouncementDto, UpdateAnnouncementDto,
};
use crate::modules::assignments::model::{Assignment, CreateAssignmentDto, SubmitAssignmentDto};
use crate::modules::audit::model::{AuditLog, CreateAuditLogDto};
use crate::modules::auth::model::{ErrorResponse, LoginDto, SignupDto};
use crate::modules::courses::model::{
    AssignLecturerDto, Course, CourseWithPrerequisites, CreateCourseDto, UpdateCourseDto,
};
use crate::modules::documents::model::{
    CreateDocumentRequestDto, DocumentRequest, UpdateDocumentRequestDto,
};
use crate::modules::fees::model::{
    ClearanceStats, ClearanceStatus, CreateFeeStructureDto, CreatePaymentDto, FeeClearance,
    FeeStructure, Payment, UpdateFeeStructureDto, UpsertClearanceDto,
};
use crate::modules::grades::model::{CreateGradeDto, Grade, GradeListing, LetterGrade};
use crate::modules::hostels::model::{
    CreateBookingDto, CreateHostelDto, CreateRoomDto, Hostel, Room, RoomStatus,
    StudentRoomBooking, UpdateHostelDto, UpdateRoomDto,
};
use crate::modules::registrations::model::{
    CreateRegistrationDto, RegistrationListing, UnitRegistration,
};
use crate::modules::semesters::model::{CreateSemesterDto, Semester, UpdateSemesterDto};
use crate::modules::users::model::{
    LecturerListing, LecturerProfile, PaginatedUsersResponse, StudentProfile, UpdateUserDto, User,
    UserRole, UserWithProfile,
};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::signup,
        crate::modules::auth::controller::login,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_user,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::delete_user,
        crate::modules::users::controller::get_lecturers,
        crate::modules::users::controller::get_programs,
        crate::modules::semesters::controller::create_semester,
        crate::modules::semesters::controller::get_semesters,
        crate::modules::semesters::controller::get_active_semester,
        crate::modules::semesters::controller::get_semester,
        crate::modules::semesters::controller::update_semester,
        crate::modules::semesters::controller::activate_semester,
        crate::modules::semesters::controller::delete_semester,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::courses::controller::get_dependent_courses,
        crate::modules::courses::controller::add_prerequisite,
        crate::modules::courses::controller::remove_prerequisite,
        crate::modules::courses::controller::assign_lecturer,
        crate::modules::registrations::controller::create_registration,
        crate::modules::registrations::controller::get_registrations,
        crate::modules::registrations::controller::delete_registration,
        crate::modules::grades::controller::create_grade,
        crate::modules::grades::controller::get_grades,
        crate::modules::hostels::controller::create_hostel,
        crate::modules::hostels::controller::get_hostels,
        crate::modules::hostels::controller::get_hostel,
        crate::modules::hostels::controller::update_hostel,
        crate::modules::hostels::controller::delete_hostel,
        crate::modules::hostels::controller::create_room,
        crate::modules::hostels::controller::get_rooms,
        crate::modules::hostels::controller::get_room,
        crate::modules::hostels::controller::update_room,
        crate::modules::hostels::controller::delete_room,
        crate::modules::hostels::controller::create_booking,
        crate::modules::hostels::controller::get_bookings,
        crate::modules::hostels::controller::release_booking,
        crate::modules::fees::controller::create_fee_structure,
        crate::modules::fees::controller::get_fee_structures,
        crate::modules::fees::controller::get_fee_structure,
        crate::modules::fees::controller::update_fee_structure,
        crate::modules::fees::controller::delete_fee_structure,
        crate::modules::fees::controller::create_payment,
        crate::modules::fees::controller::get_payments,
        crate::modules::fees::controller::upsert_clearance,
        crate::modules::fees::controller::get_clearances,
        crate::modules::fees::controller::get_clearance_stats,
        crate::modules::fees::controller::get_clearance,
        crate::modules::admissions::controller::submit_application,
        crate::modules::admissions::controller::get_applications,
        crate::modules::admissions::controller::get_application,
        crate::modules::admissions::controller::approve_application,
        crate::modules::admissions::controller::reject_application,
        crate::modules::announcements::controller::create_announcement,
        crate::modules::announcements::controller::get_announcements,
        crate::modules::announcements::controller::get_announcement,
        crate::modules::announcements::controller::update_announcement,
        crate::modules::announcements::controller::delete_announcement,
        crate::modules::audit::controller::create_audit_log,
        crate::modules::audit::controller::get_audit_logs,
        crate::modules::documents::controller::create_document_request,
        crate::modules::documents::controller::get_document_requests,
        crate::modules::documents::controller::update_document_request,
        crate::modules::documents::controller::delete_document_request,
        crate::modules::assignments::controller::create_assignment,
        crate::modules::assignments::controller::get_assignments,
        crate::modules::assignments::controller::get_assignment,
        crate::modules::assignments::controller::submit_assignment,
        crate::modules::assignments::controller::delete_assignment,
    ),
    components(
        schemas(
            User,
            UserRole,
            UserWithProfile,
            StudentProfile,
            LecturerProfile,
            LecturerListing,
            PaginatedUsersResponse,
            UpdateUserDto,
            SignupDto,
            LoginDto,
            ErrorResponse,
            Semester,
            CreateSemesterDto,
            UpdateSemesterDto,
            Course,
            CourseWithPrerequisites,
            CreateCourseDto,
            UpdateCourseDto,
            AssignLecturerDto,
            UnitRegistration,
            RegistrationListing,
            CreateRegistrationDto,
            Grade,
            GradeListing,
            LetterGrade,
            CreateGradeDto,
            Hostel,
            Room,
            RoomStatus,
            StudentRoomBooking,
            CreateHostelDto,
            UpdateHostelDto,
            CreateRoomDto,
            UpdateRoomDto,
            CreateBookingDto,
            FeeStructure,
            Payment,
            FeeClearance,
            ClearanceStatus,
            ClearanceStats,
            CreateFeeStructureDto,
            UpdateFeeStructureDto,
            CreatePaymentDto,
            UpsertClearanceDto,
            AdmissionApplication,
            ApplicationStatus,
            SubmitApplicationDto,
            DecideApplicationDto,
            Announcement,
            CreateAnnouncementDto,
            UpdateAnnouncementDto,
            AuditLog,
            CreateAuditLogDto,
            DocumentRequest,
            CreateDocumentRequestDto,
            UpdateDocumentRequestDto,
            Assignment,
            CreateAssignmentDto,
            SubmitAssignmentDto,
            PaginationMeta,
            PaginationParams,
        )
    ),
    tags(
        (name = "Auth", description = "Signup and login"),
        (name = "Users", description = "User accounts and profiles"),
        (name = "Semesters", description = "Academic semesters"),
        (name = "Courses", description = "Courses and prerequisite edges"),
        (name = "Registrations", description = "Unit registrations"),
        (name = "Grades", description = "Letter grade records"),
        (name = "Hostels", description = "Hostels, rooms and bed bookings"),
        (name = "Fees", description = "Fee structures, payments and clearances"),
        (name = "Admissions", description = "Admission applications"),
        (name = "Announcements", description = "Campus announcements"),
        (name = "Audit", description = "Administrative audit trail"),
        (name = "Documents", description = "Student document requests"),
        (name = "Assignments", description = "Course assignments")
    ),
    info(
        title = "Campusgate API",
        version = "0.1.0",
        description = "University student-portal backend built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;
