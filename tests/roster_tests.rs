mod common;
use common::student;
use stutra::core::roster::{SectionFilter, build_roster};
use stutra::models::Student;
use stutra::models::student::normalize_sections;

#[test]
fn test_filter_selects_members_only() {
    let students = vec![
        student(1, "Alice", &["A"]),
        student(2, "Bob", &["B"]),
        student(3, "Carol", &["B", "A"]),
    ];

    let roster = build_roster(&students, &SectionFilter::parse(Some("A")));
    let names: Vec<_> = roster.iter().map(|e| e.student.name.as_str()).collect();
    assert_eq!(names, vec!["Alice", "Carol"]);
}

#[test]
fn test_all_sentinel_is_case_insensitive() {
    assert_eq!(SectionFilter::parse(Some("ALL")), SectionFilter::All);
    assert_eq!(SectionFilter::parse(Some(" all ")), SectionFilter::All);
    assert_eq!(SectionFilter::parse(None), SectionFilter::All);
    assert_eq!(
        SectionFilter::parse(Some("Raman")),
        SectionFilter::Named("Raman".to_string())
    );

    let students = vec![student(1, "Alice", &["A"]), student(2, "Bob", &["B"])];
    assert_eq!(build_roster(&students, &SectionFilter::All).len(), 2);
}

#[test]
fn test_case_insensitive_sort_and_roll_numbers() {
    let students = vec![
        student(1, "charlie", &["A"]),
        student(2, "Alice", &["A"]),
        student(3, "bob", &["A"]),
    ];

    let roster = build_roster(&students, &SectionFilter::All);
    let view: Vec<_> = roster
        .iter()
        .map(|e| (e.roll_number, e.student.name.as_str()))
        .collect();
    assert_eq!(view, vec![(1, "Alice"), (2, "bob"), (3, "charlie")]);
}

#[test]
fn test_sort_does_not_depend_on_input_order() {
    let a = vec![
        student(4, "Sam", &["A"]),
        student(2, "sam", &["A"]),
        student(9, "Ann", &["A"]),
    ];
    let mut b = a.clone();
    b.reverse();

    let ids = |s: &[Student]| -> Vec<i64> {
        build_roster(s, &SectionFilter::All)
            .iter()
            .map(|e| e.student.id)
            .collect()
    };
    assert_eq!(ids(&a), ids(&b));
    assert_eq!(ids(&a), vec![9, 2, 4]);
}

#[test]
fn test_roll_numbers_restart_per_filter() {
    let students = vec![
        student(1, "Alice", &["A"]),
        student(2, "Bob", &["B"]),
        student(3, "Zed", &["B"]),
    ];

    let roster = build_roster(&students, &SectionFilter::parse(Some("B")));
    assert_eq!(roster[0].roll_number, 1);
    assert_eq!(roster[0].student.name, "Bob");
    assert_eq!(roster[1].roll_number, 2);
}

#[test]
fn test_legacy_section_merged_once() {
    assert_eq!(
        normalize_sections(vec!["A", " B ", "", "A"], Some("C")),
        vec!["A", "B", "C"]
    );
    assert_eq!(normalize_sections(Vec::<String>::new(), Some("Raman")), vec!["Raman"]);
    assert_eq!(normalize_sections(vec!["Raman"], Some("Raman")), vec!["Raman"]);

    let s = Student::new(1, "Legacy", "", Vec::new(), Some("Raman"));
    assert_eq!(s.primary_section(), "Raman");
    assert!(SectionFilter::parse(Some("Raman")).matches(&s));
}
