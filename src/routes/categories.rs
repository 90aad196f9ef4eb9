use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Map, Value};

type Grouping = &'static [(&'static str, &'static [&'static str])];

const LEVELS: &[&str] = &[
    "Grade 9", "Grade 8", "Grade 7", "Grade 6", "Grade 5", "Grade 4", "Grade 3", "Grade 2", "Grade 1", "Playgroup",
    "PP1", "PP2", "Form 1", "Form 2", "Form 3", "Form 4",
];

const EDUCATION_LEVELS: Grouping = &[
    ("Pre-Primary", &["Playgroup", "PP1", "PP2"]),
    ("Lower Primary", &["Grade 1", "Grade 2", "Grade 3"]),
    ("Upper Primary", &["Grade 4", "Grade 5", "Grade 6"]),
    ("Junior School", &["Grade 7", "Grade 8", "Grade 9"]),
    ("Senior School", &["Grade 10", "Grade 11", "Grade 12"]),
    ("High School", &["Form 1", "Form 2", "Form 3", "Form 4"]),
];

const RESOURCE_TYPES_BY_LEVEL: Grouping = &[
    (
        "All Education Levels",
        &[
            "Opener Exam",
            "Mid Term Exam",
            "End Term Exam",
            "Schemes of Work",
            "Lesson Plan",
            "Notes",
            "Assignment",
            "Topic-tests",
            "Lesson Plans",
            "Syllabus",
            "Study Guide",
            "Marking Scheme",
            "Design-Material",
        ],
    ),
    ("High School", &["KCSE", "Mock"]),
    ("Upper Primary", &["KPSEA"]),
    ("Teacher", &["Lesson Plans", "Syllabus", "Schemes of Work", "Study Guide", "Marking Scheme", "Design-Material"]),
    ("Misc", &["Assessment Book", "Record of Work", "CBC Assessment Rubric"]),
];

const RESOURCE_TYPE_CATEGORIES: Grouping = &[
    (
        "Exams and Past Papers",
        &["Opener Exam", "Mid Term Exam", "End Term Exam", "KCSE", "Mock", "KPSEA", "Topic-tests"],
    ),
    (
        "Teacher's Resources",
        &[
            "Schemes of Work",
            "Lesson Plan",
            "Syllabus",
            "Study Guide",
            "Marking Scheme",
            "Design-Material",
            "Record of Work",
            "CBC Assessment Rubric",
        ],
    ),
    ("Notes", &["Notes", "Assignment", "Study Guide"]),
    ("Other", &["Assessment Book", "Design-Material"]),
];

const SUBJECTS: Grouping = &[
    (
        "High School",
        &[
            "Mathematics",
            "English",
            "Kiswahili",
            "Biology",
            "Chemistry",
            "Physics",
            "History & Government",
            "Geography",
            "Christian Religious Education",
            "Islamic Religious Education",
            "Hindu Religious Education",
            "Business Studies",
            "Agriculture",
            "Computer Studies",
            "Home Science",
            "Art & Design",
            "Music",
            "French",
            "German",
            "Arabic",
            "Aviation Technology",
            "Woodwork",
            "Metalwork",
        ],
    ),
    (
        "Pre-Primary",
        &[
            "Language Activities",
            "English",
            "Kiswahili",
            "Mathematical Activities",
            "Environmental Activities",
            "Psychomotor & Creative Activities",
            "Art",
            "Music",
            "Movement",
            "Christian Religious Education",
            "Islamic Religious Education",
            "Hindu Religious Education",
            "Pastoral Instruction",
        ],
    ),
    (
        "Lower Primary",
        &[
            "English",
            "Kiswahili",
            "Mathematics",
            "Environmental Activities",
            "Hygiene & Nutrition",
            "Christian Religious Education",
            "Islamic Religious Education",
            "Hindu Religious Education",
            "Movement & Creative Arts",
            "Music",
            "Art",
            "Physical Education",
        ],
    ),
    (
        "Upper-Primary",
        &[
            "English",
            "Kiswahili",
            "Mathematics",
            "Science & Technology",
            "Social Studies",
            "History",
            "Geography",
            "Citizenship",
            "Christian Religious Education",
            "Islamic Religious Education",
            "Hindu Religious Education",
        ],
    ),
    (
        "Junior-Secondary",
        &[
            "English",
            "Kiswahili",
            "Mathematics",
            "Integrated Science",
            "Health Education",
            "Pre-Technical Studies",
            "Social Studies",
            "History",
            "Geography",
            "Civics",
            "Business Studies",
            "Christian Religious Education",
            "Islamic Religious Education",
            "Hindu Religious Education",
            "Agriculture",
            "Life Skills",
            "Computer Science",
            "Performing Arts",
            "Music",
            "Drama",
            "Visual Arts",
            "Art & Design",
            "French",
            "German",
            "Arabic",
            "Kenyan Sign Language",
        ],
    ),
];

fn grouping_to_json(grouping: Grouping) -> Value {
    let map: Map<String, Value> = grouping.iter().map(|(group, items)| (group.to_string(), json!(items))).collect();
    Value::Object(map)
}

// Static education-level taxonomy; clients build their q1..q4 filters from it.
pub async fn get_categories() -> impl IntoResponse {
    let body = json!({
        "levels": LEVELS,
        "education levels": grouping_to_json(EDUCATION_LEVELS),
        "resource types education level": grouping_to_json(RESOURCE_TYPES_BY_LEVEL),
        "resource types categories": grouping_to_json(RESOURCE_TYPE_CATEGORIES),
        "subjects": grouping_to_json(SUBJECTS),
    });
    (StatusCode::OK, Json(body))
}
