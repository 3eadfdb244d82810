use radar_core::context::RunContext;
use radar_core::models::{JobOrigin, NormalizedRecord};
use radar_core::region::Region;

use super::job_record;

/// A job board worth checking by hand.
pub struct Board {
    pub title: &'static str,
    pub link: &'static str,
    pub summary: &'static str,
    pub region: Region,
}

pub const BOARDS: &[Board] = &[
    Board {
        title: "🔍 CRA Career Center — CS Faculty Positions",
        link: "https://careercenter.cra.org/?s=&post_type=job_listing&search_category%5B%5D=faculty",
        summary: "Computing Research Association job board. Largest source of CS academic positions in North America.",
        region: Region::Us,
    },
    Board {
        title: "🔍 HigherEdJobs — CS & IT Faculty",
        link: "https://www.higheredjobs.com/faculty/search.cfm?JobCat=93",
        summary: "Large US-focused academic job board. Filter by Computer Science / IT category.",
        region: Region::Us,
    },
    Board {
        title: "🔍 AcademicJobsOnline — Computer Science",
        link: "https://academicjobsonline.org/ajo/jobs?department=Computer+Science",
        summary: "Global academic recruitment platform. Strong for R1 universities.",
        region: Region::Global,
    },
    Board {
        title: "🔍 Times Higher Education — CS Academic Jobs",
        link: "https://www.timeshighereducation.com/unijobs/en/listing/computer-science/",
        summary: "Global academic job listings, strong for UK/Europe/Asia/Australia.",
        region: Region::Global,
    },
    Board {
        title: "🔍 jobs.ac.uk — CS & IT",
        link: "https://www.jobs.ac.uk/search/?activeFacet=subjectFacet&subjectFacet%5B0%5D=Computing+%26+IT",
        summary: "UK & Ireland academic positions. Best source for British universities.",
        region: Region::Uk,
    },
    Board {
        title: "🔍 EuroScienceJobs — Computer Science",
        link: "https://www.eurosciencejobs.com/jobs/computer_science",
        summary: "European academic positions across all countries.",
        region: Region::Europe,
    },
    Board {
        title: "🔍 CSRankings Open Positions",
        link: "https://drafty.cs.brown.edu/csopenpositions/",
        summary: "Community-maintained list of CS open positions worldwide. Updated frequently by the community.",
        region: Region::Global,
    },
    Board {
        title: "🔍 GitHub CS Faculty Jobs Wiki 2026",
        link: "https://github.com/academic-cs-jobs",
        summary: "Community-maintained spreadsheet/wiki tracking CS faculty openings and their status.",
        region: Region::Global,
    },
];

pub fn curated_boards(ctx: &RunContext) -> Vec<NormalizedRecord> {
    BOARDS
        .iter()
        .map(|b| {
            job_record(
                b.title.to_string(),
                b.link.to_string(),
                b.summary,
                b.region,
                JobOrigin::Board,
                ctx,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use radar_core::merge::dedup_by_title;

    #[test]
    fn boards_are_distinct_and_tagged() {
        let boards = curated_boards(&RunContext::at(Utc::now()));
        assert_eq!(boards.len(), 8);
        assert_eq!(dedup_by_title(boards.clone()).len(), 8);
        assert_eq!(boards[4].matched_keyword, "🇬🇧 UK");
        assert!(boards.iter().all(|b| b.extras.origin == Some(JobOrigin::Board)));
    }
}
