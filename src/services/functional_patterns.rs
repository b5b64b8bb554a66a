//! Reusable functional patterns for the service layer.
//!
//! Composable building blocks shared by the customer workflow: an ordered
//! validation combinator, common validation rules, and a Reader-style wrapper
//! for database operations so queries can be built without passing the
//! connection around explicitly.

use std::marker::PhantomData;

use crate::{
    config::db::{Connection, Pool},
    error::{ErrorKind, ServiceError, ServiceResult},
};

/// Composable query operations using the Reader monad pattern.
pub struct QueryReader<T> {
    run: Box<dyn Fn(&mut Connection) -> ServiceResult<T> + Send + Sync>,
}

impl<T> QueryReader<T> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Connection) -> ServiceResult<T> + Send + Sync + 'static,
    {
        Self { run: Box::new(f) }
    }

    /// Execute the query with the provided connection.
    pub fn run(&self, conn: &mut Connection) -> ServiceResult<T> {
        (self.run)(conn)
    }

    /// Map the result of this query to a new type.
    pub fn map<U, F>(self, f: F) -> QueryReader<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        T: 'static,
    {
        QueryReader::new(move |conn| self.run(conn).map(&f))
    }
}

/// Execute a QueryReader with a database pool.
pub fn run_query<T>(reader: QueryReader<T>, pool: &Pool) -> ServiceResult<T> {
    pool.get()
        .map_err(|e| {
            ServiceError::internal_server_error(format!("Failed to get database connection: {}", e))
        })
        .and_then(|mut conn| reader.run(&mut conn))
}

/// Category-aware error logging for service results.
///
/// Storage faults are the only category carrying operator-relevant context,
/// so they log at `error` with the full context attached; the routine
/// categories (validation, not-found, conflict) log at `debug`.
pub trait FunctionalErrorHandling<T> {
    fn log_error(self, operation: &str) -> ServiceResult<T>;
}

impl<T> FunctionalErrorHandling<T> for ServiceResult<T> {
    fn log_error(self, operation: &str) -> ServiceResult<T> {
        if let Err(err) = &self {
            match err.kind() {
                ErrorKind::InternalServerError => {
                    log::error!("{} failed: {} ({:?})", operation, err, err.context())
                }
                _ => log::debug!("{} rejected: {}", operation, err),
            }
        }
        self
    }
}

/// Functional validation combinator. Rules run in the order they were added
/// and the first failure wins; no error aggregation.
pub struct Validator<T> {
    rules: Vec<Box<dyn Fn(&T) -> ServiceResult<()> + Send + Sync>>,
    _phantom: PhantomData<T>,
}

impl<T> Validator<T> {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            _phantom: PhantomData,
        }
    }

    /// Add a validation rule.
    pub fn rule<F>(mut self, rule: F) -> Self
    where
        F: Fn(&T) -> ServiceResult<()> + Send + Sync + 'static,
    {
        self.rules.push(Box::new(rule));
        self
    }

    /// Validate the input against all rules.
    pub fn validate(&self, input: &T) -> ServiceResult<()> {
        for rule in &self.rules {
            rule(input)?;
        }
        Ok(())
    }
}

impl<T> Default for Validator<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Common reusable validation rules.
pub mod validation_rules {
    use super::{ServiceError, ServiceResult};
    use regex::Regex;
    use std::collections::HashMap;
    use std::sync::{Arc, OnceLock, RwLock};

    /// Mailbox grammar: local part, "@", domain with at least one dot.
    pub const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

    /// Validate that a string is not empty.
    pub fn required(field_name: &'static str) -> impl Fn(&String) -> ServiceResult<()> {
        move |value: &String| {
            if value.trim().is_empty() {
                Err(ServiceError::bad_request(format!(
                    "{} is required",
                    field_name
                )))
            } else {
                Ok(())
            }
        }
    }

    /// Validate that a value matches a regex pattern.
    pub fn pattern(
        field_name: &'static str,
        pattern: &'static str,
    ) -> impl Fn(&String) -> ServiceResult<()> {
        move |value: &String| {
            if !matches(pattern, value) {
                Err(ServiceError::bad_request(format!(
                    "{} format is invalid",
                    field_name
                )))
            } else {
                Ok(())
            }
        }
    }

    /// Validate that a string is a valid email.
    pub fn email(field_name: &'static str) -> impl Fn(&String) -> ServiceResult<()> {
        pattern(field_name, EMAIL_PATTERN)
    }

    /// Cached-regex predicate for rules that need their own error message.
    pub fn matches(pattern: &str, value: &str) -> bool {
        static REGEX_CACHE: OnceLock<Arc<RwLock<HashMap<String, Regex>>>> = OnceLock::new();

        let cache = REGEX_CACHE.get_or_init(|| Arc::new(RwLock::new(HashMap::new())));

        let regex = {
            let cache_read = cache.read().unwrap();
            if let Some(regex) = cache_read.get(pattern) {
                regex.clone()
            } else {
                drop(cache_read);
                let mut cache_write = cache.write().unwrap();
                cache_write
                    .entry(pattern.to_string())
                    .or_insert_with(|| Regex::new(pattern).expect("Invalid regex pattern"))
                    .clone()
            }
        };

        regex.is_match(value)
    }
}
