use std::fmt;

/// Opaque identifier assigned by ECS to a launched task.
///
/// Returned to the host as the instance `cloud_id`. No format validation is applied:
/// the value is whatever the remote service reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskArn(String);

impl TaskArn {
    /// Create a task identifier from any string-like value.
    pub fn new(arn: impl Into<String>) -> Self {
        Self(arn.into())
    }

    /// Borrow the underlying identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier and return the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskArn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TaskArn {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskArn {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<TaskArn> for String {
    fn from(arn: TaskArn) -> Self {
        arn.0
    }
}
