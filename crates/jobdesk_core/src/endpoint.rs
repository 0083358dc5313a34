use std::fmt;
use std::str::FromStr;

use url::Url;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for JobId {
    fn from(raw: u64) -> Self {
        Self::new(raw.to_string())
    }
}

/// Status filter terms understood by the job list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobFilter {
    Waiting,
    Queued,
    Processing,
    Done,
    Uploaded,
    Failed,
}

impl JobFilter {
    pub const ALL: [JobFilter; 6] = [
        JobFilter::Waiting,
        JobFilter::Queued,
        JobFilter::Processing,
        JobFilter::Done,
        JobFilter::Uploaded,
        JobFilter::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            JobFilter::Waiting => "waiting",
            JobFilter::Queued => "queued",
            JobFilter::Processing => "processing",
            JobFilter::Done => "done",
            JobFilter::Uploaded => "uploaded",
            JobFilter::Failed => "failed",
        }
    }

    /// Parse a comma separated `types` value. Unknown and empty terms are skipped.
    pub fn parse_list(raw: &str) -> Vec<JobFilter> {
        raw.split(',')
            .filter_map(|term| term.trim().parse().ok())
            .collect()
    }

    /// Filter set a filter button links to: drops `self` when active, appends it otherwise.
    pub fn toggle_link(self, active: &[JobFilter]) -> Vec<JobFilter> {
        if active.contains(&self) {
            active.iter().copied().filter(|term| *term != self).collect()
        } else {
            let mut next = active.to_vec();
            next.push(self);
            next
        }
    }
}

impl FromStr for JobFilter {
    type Err = EndpointError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        JobFilter::ALL
            .into_iter()
            .find(|term| term.as_str() == raw)
            .ok_or_else(|| EndpointError::UnknownFilter(raw.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("base url cannot carry a path: {0}")]
    CannotBeABase(String),
    #[error("job id is empty")]
    EmptyJobId,
    #[error("job id {0:?} is a dot segment")]
    DotSegmentJobId(String),
    #[error("unknown job filter {0:?}")]
    UnknownFilter(String),
}

/// Server endpoints the page talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Save,
    QueueJob(JobId),
    QueueAllReady,
    DequeueJob(JobId),
    DeleteJob(JobId),
    SetYoutubeInfo(JobId),
    SetYoutubeInfoAll,
    JobDetails(JobId),
    JobImage(JobId),
    JobAudio(JobId),
    JobVideo(JobId),
    Jobs(Vec<JobFilter>),
}

impl Endpoint {
    /// Logical endpoint name, as used in server routing.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Save => "save",
            Endpoint::QueueJob(_) => "queue_job",
            Endpoint::QueueAllReady => "queue_all_ready",
            Endpoint::DequeueJob(_) => "dequeue_job",
            Endpoint::DeleteJob(_) => "delete_job",
            Endpoint::SetYoutubeInfo(_) => "set_youtube_info",
            Endpoint::SetYoutubeInfoAll => "set_youtube_info_all",
            Endpoint::JobDetails(_) => "job_page",
            Endpoint::JobImage(_) => "get_job_image",
            Endpoint::JobAudio(_) => "get_job_audio",
            Endpoint::JobVideo(_) => "get_job_video",
            Endpoint::Jobs(_) => "list_jobs",
        }
    }

    /// Whether the endpoint answers with a JSON boolean.
    pub fn is_action(&self) -> bool {
        matches!(
            self,
            Endpoint::Save
                | Endpoint::QueueJob(_)
                | Endpoint::QueueAllReady
                | Endpoint::DequeueJob(_)
                | Endpoint::DeleteJob(_)
                | Endpoint::SetYoutubeInfo(_)
                | Endpoint::SetYoutubeInfoAll
        )
    }

    pub fn job_id(&self) -> Option<&JobId> {
        match self {
            Endpoint::QueueJob(id)
            | Endpoint::DequeueJob(id)
            | Endpoint::DeleteJob(id)
            | Endpoint::SetYoutubeInfo(id)
            | Endpoint::JobDetails(id)
            | Endpoint::JobImage(id)
            | Endpoint::JobAudio(id)
            | Endpoint::JobVideo(id) => Some(id),
            _ => None,
        }
    }

    /// Resolve against `base`. Segments are appended to the base path and
    /// any base query or fragment is dropped.
    pub fn url(&self, base: &Url) -> Result<Url, EndpointError> {
        // Dot segments would be normalized away and retarget the request.
        if let Some(id) = self.job_id() {
            match id.as_str() {
                "" => return Err(EndpointError::EmptyJobId),
                "." | ".." => return Err(EndpointError::DotSegmentJobId(id.to_string())),
                _ => {}
            }
        }

        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| EndpointError::CannotBeABase(base.to_string()))?;
            segments.pop_if_empty();
            match self {
                Endpoint::Save => {
                    segments.push("save");
                }
                Endpoint::QueueAllReady => {
                    segments.extend(["jobs", "queue_all_ready"]);
                }
                Endpoint::SetYoutubeInfoAll => {
                    segments.extend(["jobs", "set_youtube_info_all"]);
                }
                Endpoint::Jobs(_) => {
                    segments.push("jobs");
                }
                Endpoint::JobDetails(id) => {
                    segments.extend(["job", id.as_str()]);
                }
                Endpoint::QueueJob(id)
                | Endpoint::DequeueJob(id)
                | Endpoint::DeleteJob(id)
                | Endpoint::SetYoutubeInfo(id)
                | Endpoint::JobImage(id)
                | Endpoint::JobAudio(id)
                | Endpoint::JobVideo(id) => {
                    segments.extend(["job", id.as_str(), self.job_action()]);
                }
            }
        }

        if let Endpoint::Jobs(filters) = self {
            if !filters.is_empty() {
                let joined = filters
                    .iter()
                    .map(|term| term.as_str())
                    .collect::<Vec<_>>()
                    .join(",");
                url.set_query(Some(&format!("types={joined}")));
            }
        }

        Ok(url)
    }

    fn job_action(&self) -> &'static str {
        match self {
            Endpoint::QueueJob(_) => "queue",
            Endpoint::DequeueJob(_) => "dequeue",
            Endpoint::DeleteJob(_) => "delete",
            Endpoint::SetYoutubeInfo(_) => "set_youtube_info",
            Endpoint::JobImage(_) => "image",
            Endpoint::JobAudio(_) => "audio",
            Endpoint::JobVideo(_) => "video",
            _ => "",
        }
    }
}
