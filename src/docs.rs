use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use tuitionhub_core::{PaginationMeta, PaginationParams};
use tuitionhub_models::attendance::{
    AttendanceEntryDto, AttendanceRecord, MyAttendanceResponse, RosterEntry, RosterResponse,
    SaveAttendanceDto, SaveAttendanceResponse,
};
use tuitionhub_models::chapters::{Chapter, ChapterWithContext, CreateChapterDto, UpdateChapterDto};
use tuitionhub_models::classes::{Class, CreateClassDto, UpdateClassDto};
use tuitionhub_models::exams::{Exam, ExamDto, ExamSubjectDto, ExamSubjectInfo};
use tuitionhub_models::files::{ContentFile, CreateFileDto, FileType, UpdateFileDto};
use tuitionhub_models::leaderboard::{
    AwardPointsDto, LeaderboardEntryView, LeaderboardResponse, UserPoints,
};
use tuitionhub_models::marks::{MarkEntryDto, SaveMarksDto, SaveMarksResponse, StudentMark};
use tuitionhub_models::quizzes::{CreateQuizDto, Quiz, QuizWithContext, UpdateQuizDto};
use tuitionhub_models::students::{
    MarksReportResponse, PaginatedStudentsResponse, StudentAttendanceResponse, UpdateStudentDto,
};
use tuitionhub_models::subjects::{CreateSubjectDto, Subject, SubjectWithClass, UpdateSubjectDto};
use tuitionhub_models::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest, UserProfile, UserRole,
};
use tuitionhub_performance::{
    AttendanceStatus, AttendanceSummary, ExamMark, ExamResult, Grade, MarksReport, Rank, Score,
    SubjectAverage,
};

use crate::modules::auth::controller::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_tokens,
        crate::modules::auth::controller::get_me,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::get_class_subjects,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::subjects::controller::get_subjects,
        crate::modules::subjects::controller::get_subject,
        crate::modules::subjects::controller::get_subject_chapters,
        crate::modules::subjects::controller::create_subject,
        crate::modules::subjects::controller::update_subject,
        crate::modules::subjects::controller::delete_subject,
        crate::modules::chapters::controller::get_chapters,
        crate::modules::chapters::controller::get_chapter,
        crate::modules::chapters::controller::get_chapter_files,
        crate::modules::chapters::controller::create_chapter,
        crate::modules::chapters::controller::update_chapter,
        crate::modules::chapters::controller::delete_chapter,
        crate::modules::files::controller::get_files,
        crate::modules::files::controller::get_file,
        crate::modules::files::controller::create_file,
        crate::modules::files::controller::update_file,
        crate::modules::files::controller::delete_file,
        crate::modules::quizzes::controller::get_quizzes,
        crate::modules::quizzes::controller::get_quiz,
        crate::modules::quizzes::controller::create_quiz,
        crate::modules::quizzes::controller::update_quiz,
        crate::modules::quizzes::controller::delete_quiz,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::update_student,
        crate::modules::students::controller::get_student_attendance,
        crate::modules::students::controller::get_student_performance,
        crate::modules::exams::controller::get_exams,
        crate::modules::exams::controller::get_exam,
        crate::modules::exams::controller::create_exam,
        crate::modules::exams::controller::update_exam,
        crate::modules::exams::controller::delete_exam,
        crate::modules::exams::controller::get_subject_marks,
        crate::modules::exams::controller::save_subject_marks,
        crate::modules::attendance::controller::get_roster,
        crate::modules::attendance::controller::save_attendance,
        crate::modules::attendance::controller::get_my_attendance,
        crate::modules::marks::controller::get_my_marks,
        crate::modules::leaderboard::controller::get_leaderboard,
        crate::modules::leaderboard::controller::award_points,
    ),
    components(
        schemas(
            ErrorResponse,
            UserRole,
            UserProfile,
            RegisterRequest,
            LoginRequest,
            LoginResponse,
            RefreshTokenRequest,
            Class,
            CreateClassDto,
            UpdateClassDto,
            Subject,
            SubjectWithClass,
            CreateSubjectDto,
            UpdateSubjectDto,
            Chapter,
            ChapterWithContext,
            CreateChapterDto,
            UpdateChapterDto,
            FileType,
            ContentFile,
            CreateFileDto,
            UpdateFileDto,
            Quiz,
            QuizWithContext,
            CreateQuizDto,
            UpdateQuizDto,
            PaginationMeta,
            PaginationParams,
            PaginatedStudentsResponse,
            UpdateStudentDto,
            StudentAttendanceResponse,
            MarksReportResponse,
            Exam,
            ExamDto,
            ExamSubjectDto,
            ExamSubjectInfo,
            StudentMark,
            MarkEntryDto,
            SaveMarksDto,
            SaveMarksResponse,
            AttendanceStatus,
            AttendanceSummary,
            AttendanceRecord,
            RosterEntry,
            RosterResponse,
            AttendanceEntryDto,
            SaveAttendanceDto,
            SaveAttendanceResponse,
            MyAttendanceResponse,
            Grade,
            Score,
            ExamMark,
            ExamResult,
            SubjectAverage,
            MarksReport,
            Rank,
            LeaderboardEntryView,
            LeaderboardResponse,
            AwardPointsDto,
            UserPoints,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login and token refresh"),
        (name = "Classes", description = "Top of the content hierarchy"),
        (name = "Subjects", description = "Subjects taught in a class"),
        (name = "Chapters", description = "Chapters of a subject"),
        (name = "Files", description = "Study material attached to chapters"),
        (name = "Quizzes", description = "Chapter quizzes"),
        (name = "Students", description = "Admin-side student management"),
        (name = "Exams", description = "Exams, exam subjects and mark entry"),
        (name = "Attendance", description = "Daily attendance per class"),
        (name = "Marks", description = "Student marks reports"),
        (name = "Leaderboard", description = "Points, levels and badges")
    ),
    info(
        title = "TuitionHub API",
        version = "0.1.0",
        description = "Tuition center management: content, students, exams, attendance and performance.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
