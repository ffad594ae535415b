//! Job Search Predicate
//!
//! Pure, synchronous filtering over an in-memory job list: a free-text
//! query combined with faceted filters. This is a view concern; it never
//! touches storage and is deterministic for a given input.

use std::fmt;
use std::str::FromStr;

use crate::domain::Job;

/// Salary facet bands, mirroring the browse UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBand {
    /// Up to 40,000.
    UpTo40k,
    /// 40,000 to 1 lakh.
    From40kTo1L,
    /// 1 lakh to 5 lakh.
    From1LTo5L,
}

impl SalaryBand {
    pub fn contains(&self, salary: u64) -> bool {
        match self {
            Self::UpTo40k => salary <= 40_000,
            Self::From40kTo1L => salary > 40_000 && salary <= 100_000,
            Self::From1LTo5L => salary > 100_000 && salary <= 500_000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UpTo40k => "0-40k",
            Self::From40kTo1L => "40k-1lakh",
            Self::From1LTo5L => "1lakh-5lakh",
        }
    }
}

impl fmt::Display for SalaryBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SalaryBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "0-40k" => Ok(Self::UpTo40k),
            "40k-1lakh" => Ok(Self::From40kTo1L),
            "1lakh-5lakh" => Ok(Self::From1LTo5L),
            other => Err(format!("unknown salary band: {}", other)),
        }
    }
}

/// Combined free-text query and facet selections. All dimensions optional;
/// the empty filter matches everything.
#[derive(Debug, Clone, Default)]
pub struct JobFilter {
    /// Case-insensitive substring matched against title, description, or
    /// location.
    pub query: Option<String>,
    /// Exact location facet.
    pub location: Option<String>,
    /// Exact industry facet, matched against the job title.
    pub industry: Option<String>,
    pub salary_band: Option<SalaryBand>,
}

impl JobFilter {
    pub fn is_empty(&self) -> bool {
        self.effective_query().is_none()
            && self.location.is_none()
            && self.industry.is_none()
            && self.salary_band.is_none()
    }

    /// The query with blank input normalized away.
    fn effective_query(&self) -> Option<&str> {
        self.query.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    pub fn matches(&self, job: &Job) -> bool {
        if let Some(query) = self.effective_query() {
            let query = query.to_lowercase();
            let hit = [&job.title, &job.description, &job.location]
                .into_iter()
                .any(|field| field.to_lowercase().contains(&query));
            if !hit {
                return false;
            }
        }

        if let Some(location) = &self.location {
            if &job.location != location {
                return false;
            }
        }

        if let Some(industry) = &self.industry {
            if &job.title != industry {
                return false;
            }
        }

        if let Some(band) = &self.salary_band {
            if !band.contains(job.salary) {
                return false;
            }
        }

        true
    }
}

/// Filter a job list, preserving order. The empty filter returns the input
/// unchanged; filtering an already-filtered list with the same filter is a
/// no-op.
pub fn filter_jobs(mut jobs: Vec<Job>, filter: &JobFilter) -> Vec<Job> {
    if filter.is_empty() {
        return jobs;
    }
    jobs.retain(|job| filter.matches(job));
    jobs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, location: &str, salary: u64) -> Job {
        Job::new(
            title,
            format!("{} role", title),
            salary,
            2,
            location,
            "Full Time",
            1,
            "company-1",
            "recruiter-1",
        )
    }

    fn sample_jobs() -> Vec<Job> {
        vec![
            job("Frontend Dev", "Pune", 35_000),
            job("Backend Dev", "Pune", 90_000),
            job("Data Engineer", "Bangalore", 300_000),
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let jobs = sample_jobs();
        let ids: Vec<String> = jobs.iter().map(|j| j.id.clone()).collect();

        let filtered = filter_jobs(jobs, &JobFilter::default());
        let filtered_ids: Vec<String> = filtered.iter().map(|j| j.id.clone()).collect();
        assert_eq!(ids, filtered_ids);
    }

    #[test]
    fn test_blank_query_is_identity() {
        let jobs = sample_jobs();
        let filter = JobFilter {
            query: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert_eq!(filter_jobs(jobs, &filter).len(), 3);
    }

    #[test]
    fn test_query_matches_title_case_insensitively() {
        let filter = JobFilter {
            query: Some("frontend".to_string()),
            ..Default::default()
        };
        let filtered = filter_jobs(sample_jobs(), &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Frontend Dev");
    }

    #[test]
    fn test_query_matches_location_field() {
        let filter = JobFilter {
            query: Some("bangalore".to_string()),
            ..Default::default()
        };
        let filtered = filter_jobs(sample_jobs(), &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Data Engineer");
    }

    #[test]
    fn test_facets_combine_with_query() {
        let filter = JobFilter {
            query: Some("dev".to_string()),
            location: Some("Pune".to_string()),
            salary_band: Some(SalaryBand::From40kTo1L),
            ..Default::default()
        };
        let filtered = filter_jobs(sample_jobs(), &filter);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Backend Dev");
    }

    #[test]
    fn test_industry_facet_is_exact() {
        let filter = JobFilter {
            industry: Some("Frontend Dev".to_string()),
            ..Default::default()
        };
        assert_eq!(filter_jobs(sample_jobs(), &filter).len(), 1);

        let filter = JobFilter {
            industry: Some("Frontend".to_string()),
            ..Default::default()
        };
        assert!(filter_jobs(sample_jobs(), &filter).is_empty());
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let filter = JobFilter {
            query: Some("dev".to_string()),
            location: Some("Pune".to_string()),
            ..Default::default()
        };
        let once = filter_jobs(sample_jobs(), &filter);
        let once_ids: Vec<String> = once.iter().map(|j| j.id.clone()).collect();

        let twice = filter_jobs(once, &filter);
        let twice_ids: Vec<String> = twice.iter().map(|j| j.id.clone()).collect();
        assert_eq!(once_ids, twice_ids);
    }

    #[test]
    fn test_salary_band_bounds() {
        assert!(SalaryBand::UpTo40k.contains(0));
        assert!(SalaryBand::UpTo40k.contains(40_000));
        assert!(!SalaryBand::UpTo40k.contains(40_001));

        assert!(SalaryBand::From40kTo1L.contains(40_001));
        assert!(SalaryBand::From40kTo1L.contains(100_000));
        assert!(!SalaryBand::From40kTo1L.contains(100_001));

        assert!(SalaryBand::From1LTo5L.contains(100_001));
        assert!(SalaryBand::From1LTo5L.contains(500_000));
        assert!(!SalaryBand::From1LTo5L.contains(500_001));
    }

    #[test]
    fn test_salary_band_parsing() {
        assert_eq!("0-40k".parse::<SalaryBand>().unwrap(), SalaryBand::UpTo40k);
        assert_eq!("40K-1LAKH".parse::<SalaryBand>().unwrap(), SalaryBand::From40kTo1L);
        assert_eq!("1lakh-5lakh".parse::<SalaryBand>().unwrap(), SalaryBand::From1LTo5L);
        assert!("6lakh+".parse::<SalaryBand>().is_err());
    }
}
