//! Marks aggregation: per-exam totals, per-subject averages and an overall
//! score, each with a letter grade.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::PerformanceError;
use crate::grade::Grade;

/// One graded mark, already joined with its exam and subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExamMark {
    pub exam_id: Uuid,
    pub exam_name: String,
    pub exam_date: NaiveDate,
    pub subject_name: String,
    pub marks_obtained: f64,
    pub max_marks: f64,
}

impl ExamMark {
    pub fn percentage(&self) -> Option<f64> {
        percentage(self.marks_obtained, self.max_marks)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Score {
    pub obtained: f64,
    pub max: f64,
    pub percentage: f64,
    pub grade: Grade,
}

impl Score {
    fn from_totals(obtained: f64, max: f64, label: &str) -> Result<Self, PerformanceError> {
        let percentage = percentage(obtained, max)
            .ok_or_else(|| PerformanceError::UndefinedPercentage(label.to_string()))?;
        Ok(Self {
            obtained,
            max,
            percentage,
            grade: Grade::from_percentage(percentage),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ExamResult {
    pub exam_id: Uuid,
    pub exam_name: String,
    pub exam_date: NaiveDate,
    pub subjects: Vec<ExamMark>,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SubjectAverage {
    pub subject_name: String,
    /// Mean of the per-mark percentages, rounded to the nearest integer.
    pub average_percentage: i64,
    pub exams_taken: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MarksReport {
    pub exams: Vec<ExamResult>,
    pub subjects: Vec<SubjectAverage>,
    pub overall: Score,
}

fn percentage(obtained: f64, max: f64) -> Option<f64> {
    if max > 0.0 {
        Some(obtained * 100.0 / max)
    } else {
        None
    }
}

/// Builds a [`MarksReport`] from marks in the order they were fetched.
///
/// Exams and subjects appear in first-seen order. An empty slice is
/// [`PerformanceError::NoData`]; a group whose maximum marks sum to zero is
/// [`PerformanceError::UndefinedPercentage`].
pub fn summarize_marks(marks: &[ExamMark]) -> Result<MarksReport, PerformanceError> {
    if marks.is_empty() {
        return Err(PerformanceError::NoData);
    }

    let mut exam_groups: Vec<(Uuid, Vec<&ExamMark>)> = Vec::new();
    let mut subject_groups: Vec<(&str, Vec<&ExamMark>)> = Vec::new();

    for mark in marks {
        match exam_groups.iter_mut().find(|(id, _)| *id == mark.exam_id) {
            Some((_, group)) => group.push(mark),
            None => exam_groups.push((mark.exam_id, vec![mark])),
        }
        match subject_groups
            .iter_mut()
            .find(|(name, _)| *name == mark.subject_name)
        {
            Some((_, group)) => group.push(mark),
            None => subject_groups.push((mark.subject_name.as_str(), vec![mark])),
        }
    }

    let exams = exam_groups
        .into_iter()
        .map(|(exam_id, group)| {
            let first = group[0];
            let obtained: f64 = group.iter().map(|m| m.marks_obtained).sum();
            let max: f64 = group.iter().map(|m| m.max_marks).sum();
            Ok(ExamResult {
                exam_id,
                exam_name: first.exam_name.clone(),
                exam_date: first.exam_date,
                score: Score::from_totals(obtained, max, &first.exam_name)?,
                subjects: group.into_iter().cloned().collect(),
            })
        })
        .collect::<Result<Vec<_>, PerformanceError>>()?;

    let subjects = subject_groups
        .into_iter()
        .map(|(name, group)| {
            let percentages = group
                .iter()
                .map(|m| {
                    m.percentage()
                        .ok_or_else(|| PerformanceError::UndefinedPercentage(name.to_string()))
                })
                .collect::<Result<Vec<f64>, _>>()?;
            let average = percentages.iter().sum::<f64>() / percentages.len() as f64;
            Ok(SubjectAverage {
                subject_name: name.to_string(),
                average_percentage: average.round() as i64,
                exams_taken: percentages.len(),
            })
        })
        .collect::<Result<Vec<_>, PerformanceError>>()?;

    let obtained: f64 = marks.iter().map(|m| m.marks_obtained).sum();
    let max: f64 = marks.iter().map(|m| m.max_marks).sum();
    let overall = Score::from_totals(obtained, max, "overall")?;

    Ok(MarksReport {
        exams,
        subjects,
        overall,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mark(exam_id: Uuid, exam_name: &str, subject: &str, obtained: f64, max: f64) -> ExamMark {
        ExamMark {
            exam_id,
            exam_name: exam_name.to_string(),
            exam_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            subject_name: subject.to_string(),
            marks_obtained: obtained,
            max_marks: max,
        }
    }

    #[test]
    fn test_two_subject_exam_is_sixty_percent_grade_b() {
        let exam = Uuid::new_v4();
        let marks = vec![
            mark(exam, "Midterm", "Maths", 50.0, 100.0),
            mark(exam, "Midterm", "Physics", 70.0, 100.0),
        ];

        let report = summarize_marks(&marks).unwrap();

        assert_eq!(report.exams.len(), 1);
        assert_eq!(report.exams[0].score.percentage, 60.0);
        assert_eq!(report.exams[0].score.grade, Grade::B);
        assert_eq!(report.exams[0].score.grade.to_string(), "B");
        assert_eq!(report.overall.percentage, 60.0);
    }

    #[test]
    fn test_empty_input_is_no_data() {
        assert_eq!(summarize_marks(&[]), Err(PerformanceError::NoData));
    }

    #[test]
    fn test_zero_max_marks_is_undefined() {
        let exam = Uuid::new_v4();
        let marks = vec![mark(exam, "Quiz", "Maths", 0.0, 0.0)];

        let result = summarize_marks(&marks);

        assert!(matches!(result, Err(PerformanceError::UndefinedPercentage(_))));
    }

    #[test]
    fn test_exams_keep_first_seen_order() {
        let later = Uuid::new_v4();
        let earlier = Uuid::new_v4();
        let marks = vec![
            mark(later, "Final", "Maths", 90.0, 100.0),
            mark(earlier, "Midterm", "Maths", 40.0, 100.0),
            mark(later, "Final", "Physics", 80.0, 100.0),
        ];

        let report = summarize_marks(&marks).unwrap();

        assert_eq!(report.exams.len(), 2);
        assert_eq!(report.exams[0].exam_id, later);
        assert_eq!(report.exams[0].subjects.len(), 2);
        assert_eq!(report.exams[0].score.percentage, 85.0);
        assert_eq!(report.exams[0].score.grade, Grade::A);
        assert_eq!(report.exams[1].exam_id, earlier);
        assert_eq!(report.exams[1].score.grade, Grade::C);
    }

    #[test]
    fn test_subject_average_is_rounded_mean_of_percentages() {
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let marks = vec![
            mark(first, "Unit 1", "Maths", 17.0, 20.0),
            mark(second, "Unit 2", "Maths", 66.0, 100.0),
            mark(second, "Unit 2", "Biology", 33.0, 50.0),
        ];

        let report = summarize_marks(&marks).unwrap();

        // (85 + 66) / 2 = 75.5
        let maths = &report.subjects[0];
        assert_eq!(maths.subject_name, "Maths");
        assert_eq!(maths.average_percentage, 76);
        assert_eq!(maths.exams_taken, 2);
        assert_eq!(report.subjects[1].subject_name, "Biology");
        assert_eq!(report.subjects[1].average_percentage, 66);
    }

    #[test]
    fn test_overall_uses_summed_totals_not_mean_of_exams() {
        let small = Uuid::new_v4();
        let large = Uuid::new_v4();
        let marks = vec![
            mark(small, "Quiz", "Maths", 10.0, 10.0),
            mark(large, "Final", "Maths", 0.0, 90.0),
        ];

        let report = summarize_marks(&marks).unwrap();

        assert_eq!(report.overall.obtained, 10.0);
        assert_eq!(report.overall.max, 100.0);
        assert_eq!(report.overall.percentage, 10.0);
        assert_eq!(report.overall.grade, Grade::F);
    }

    #[test]
    fn test_half_marks_are_supported() {
        let exam = Uuid::new_v4();
        let marks = vec![mark(exam, "Test", "Chemistry", 44.5, 50.0)];

        let report = summarize_marks(&marks).unwrap();

        assert_eq!(report.overall.percentage, 89.0);
        assert_eq!(report.overall.grade, Grade::A);
    }
}
