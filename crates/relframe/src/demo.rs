//! Example chain of operators over the college data set.

use std::path::Path;

use relframe_core::{OrderedRelation, Relation};
use relframe_csv::{ReadOptions, read_relation};
use relframe_error::Result;
use tracing::info;

/// Output of a single demo step.
#[derive(Debug)]
pub struct DemoStep {
    pub title: &'static str,
    pub output: OrderedRelation,
}

struct CollegeData {
    student: Relation,
    enroll: Relation,
    section: Relation,
    course: Relation,
}

impl CollegeData {
    fn load(dir: &Path, opts: &ReadOptions) -> Result<Self> {
        let read = |table: &str| read_relation(dir.join(format!("{table}.csv")), opts);
        Ok(CollegeData {
            student: read("STUDENT")?,
            enroll: read("ENROLL")?,
            section: read("SECTION")?,
            course: read("COURSE")?,
        })
    }
}

/// Run every demo step against the data in `dir`.
pub fn run_demo(dir: &Path, opts: &ReadOptions) -> Result<Vec<DemoStep>> {
    let data = CollegeData::load(dir, opts)?;
    let CollegeData {
        student,
        enroll,
        section,
        course,
    } = &data;

    let mut steps = Vec::new();
    let mut push = |title: &'static str, output: OrderedRelation| {
        info!(%title, rows = output.len(), "demo step");
        steps.push(DemoStep { title, output });
    };

    push(
        "project",
        student.project(&["SId", "SName", "GradYear"])?.to_ordered(),
    );
    push(
        "extend",
        student
            .extend("YearsAfterGraduating", "2023 - int(GradYear)")?
            .project(&["SId", "SName", "GradYear", "YearsAfterGraduating"])?
            .to_ordered(),
    );

    let by_year = student.groupby(&["GradYear"])?;
    push("count by year", by_year.count("SName")?.to_ordered());
    push("sum by year", by_year.sum("MajorId")?.to_ordered());
    push("max by year", by_year.max("MajorId")?.to_ordered());
    push("min by year", by_year.min("MajorId")?.to_ordered());
    push(
        "mean by major",
        student.groupby(&["MajorId"])?.mean("GradYear")?.to_ordered(),
    );
    push("median by year", by_year.median("MajorId")?.to_ordered());

    push(
        "rename",
        student.rename("SName", "StudentName")?.to_ordered(),
    );
    push("sort", student.sort(&["GradYear", "MajorId"], true)?);

    push(
        "join",
        student
            .join(enroll, "SId == StudentId")?
            .project(&["SName", "GradYear", "MajorId", "EId", "SectionId", "Grade"])?
            .to_ordered(),
    );
    push(
        "join sections with courses",
        section.join(course, "CourseId == CId")?.to_ordered(),
    );
    push(
        "outer join",
        student.outerjoin(enroll, "SId == StudentId")?.to_ordered(),
    );
    push(
        "semijoin",
        student.semijoin(enroll, "SId == StudentId")?.to_ordered(),
    );
    push(
        "union",
        student
            .query("MajorId == 10")?
            .union(&student.query("MajorId == 20")?)?,
    );

    let tens = student
        .query("MajorId == 10")?
        .rename("SId", "SId2")?
        .rename("SName", "SName2")?
        .rename("GradYear", "GradYear2")?
        .rename("MajorId", "MajorId2")?;
    push(
        "antijoin",
        student.antijoin(&tens, "MajorId == MajorId2")?.to_ordered(),
    );
    push(
        "product",
        student
            .project(&["SId"])?
            .product(&enroll.project(&["EId"])?)?
            .sort(&["SId", "EId"], false)?
            .head(5),
    );

    Ok(steps)
}
