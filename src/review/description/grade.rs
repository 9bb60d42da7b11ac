//! Conversion of a numeric GPA range into a letter-grade requirement phrase.
//!
//! GPA values are not represented uniformly across campuses, and the source
//! strings are floating-point, so the boundaries between letter names are
//! imprecise. The phrase is produced by table lookup: `round(3 × GPA)` is the
//! index into `LETTERS`. Ties at .5 round to the even index, so boundary
//! values resolve the same way everywhere.

/// Letter grades indexed by `round(3 × GPA)`.
///
/// ```text
///     GPA  3×GPA  Index  Letter
///     4.3   12.9     13      A+
///     4.0   12.0     12      A
///     3.7   11.1     11      A-
///     3.3    9.9     10      B+
///     3.0    9.0      9      B
///     2.7    8.1      8      B-
///     2.3    6.9      7      C+
///     2.0    6.0      6      C
///     1.7    5.1      5      C-
///     1.3    3.9      4      D+
///     1.0    3.0      3      D
///     0.7    2.1      2      D-
/// ```
///
/// Index positions 0 and 1 are unreachable after normalization but keep the
/// table aligned.
const LETTERS: [&str; 14] = [
    "F", "F", "D-", "D", "D+", "C-", "C", "C+", "B-", "B", "B+", "A-", "A", "A+",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("min gpa {min_gpa} greater than max gpa {max_gpa}")]
pub struct GradeRangeError {
    pub min_gpa: f64,
    pub max_gpa: f64,
}

/// Convert a numeric GPA range into a description of the required grade.
///
/// The bounds are first put into canonical form to deal with creative values
/// found in the enterprise system: courses transfer only if the student
/// passed, so the minimum acceptable grade is forced up to a passing D-
/// (0.7), and values above 4.0 are used to mean "no upper limit" and are
/// capped there. Classification then takes the first matching branch; the
/// branch order is load-bearing and all branches are kept even where the
/// canonical form makes one unreachable.
pub fn grade_phrase(min_gpa: f64, max_gpa: f64) -> Result<String, GradeRangeError> {
    if min_gpa > max_gpa {
        return Err(GradeRangeError { min_gpa, max_gpa });
    }

    let min_gpa = if min_gpa < 1.0 { 0.7 } else { min_gpa };
    let max_gpa = if max_gpa > 4.0 { 4.0 } else { max_gpa };

    if min_gpa < 1.0 && max_gpa > 3.7 {
        return Ok("any passing grade".to_string());
    }

    if min_gpa >= 0.7 && max_gpa >= 3.7 {
        return Ok(format!("{} or above", letter(min_gpa)));
    }

    if min_gpa > 0.7 && max_gpa < 3.7 {
        return Ok(format!("between {} and {}", letter(min_gpa), letter(max_gpa)));
    }

    if max_gpa < 3.7 {
        return Ok(format!("below {}", letter(max_gpa)));
    }

    Ok("any passing grade".to_string())
}

fn letter(gpa: f64) -> &'static str {
    let index = round_half_even(gpa * 3.0).clamp(0, LETTERS.len() as i64 - 1) as usize;
    LETTERS[index]
}

fn round_half_even(value: f64) -> i64 {
    let floor = value.floor();
    if (value - floor - 0.5).abs() < f64::EPSILON {
        let below = floor as i64;
        if below % 2 == 0 {
            below
        } else {
            below + 1
        }
    } else {
        value.round() as i64
    }
}
