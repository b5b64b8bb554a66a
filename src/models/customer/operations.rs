//! Database operations for the Customer model.
//!
//! All storage-error classification lives here: the unique constraint on
//! `email_address` is the only uniqueness rule in the schema, so a reported
//! `UniqueViolation` always means an email conflict. The service layer never
//! pre-checks uniqueness; it writes and interprets the reported violation.

use diesel::{prelude::*, result::DatabaseErrorKind};
use uuid::Uuid;

use crate::{
    config::db::Connection,
    constants,
    error::ServiceError,
    models::customer::{Customer, CustomerChangeset, NewCustomer},
    schema::customers::dsl::*,
};

fn classify_write_error(err: diesel::result::Error, operation: &str) -> ServiceError {
    if let diesel::result::Error::DatabaseError(kind, info) = &err {
        let constraint = info.constraint_name().map(str::to_owned);
        let details = info.details().map(str::to_owned);

        let mut service_error = match kind {
            DatabaseErrorKind::UniqueViolation => {
                ServiceError::conflict(constants::MESSAGE_EMAIL_EXISTS)
            }
            DatabaseErrorKind::ForeignKeyViolation
            | DatabaseErrorKind::CheckViolation
            | DatabaseErrorKind::NotNullViolation => {
                ServiceError::bad_request(info.message().to_string())
            }
            _ => ServiceError::internal_server_error(format!("Failed to {}", operation)),
        };

        if let Some(extra) = details {
            service_error = service_error.with_context(|ctx| ctx.with_detail(extra));
        }

        if let Some(constraint_name) = constraint {
            service_error =
                service_error.with_context(|ctx| ctx.with_metadata("constraint", constraint_name));
        }

        return service_error.with_context(|ctx| ctx.with_tag("customer"));
    }

    ServiceError::internal_server_error(format!("Failed to {}", operation))
        .with_context(|ctx| ctx.with_tag("customer").with_detail(err.to_string()))
}

/// Insert a new customer row; the database assigns the id.
///
/// # Returns
///
/// `Ok(Customer)` with the created row on success.
/// `Err(ServiceError)` with a conflict when the email is already taken.
pub fn insert_customer(
    new_customer: NewCustomer,
    conn: &mut Connection,
) -> Result<Customer, ServiceError> {
    diesel::insert_into(customers)
        .values(new_customer)
        .get_result::<Customer>(conn)
        .map_err(|err| {
            log::debug!("Failed to insert customer: {}", err);
            classify_write_error(err, "create customer")
        })
}

/// Look up a customer by id. Absence is a normal outcome, not an error.
pub fn find_customer_by_id(
    customer_id: Uuid,
    conn: &mut Connection,
) -> Result<Option<Customer>, ServiceError> {
    customers
        .filter(id.eq(customer_id))
        .first::<Customer>(conn)
        .optional()
        .map_err(|err| {
            log::error!("Failed to look up customer {}: {}", customer_id, err);
            ServiceError::internal_server_error("Failed to look up customer")
                .with_context(|ctx| ctx.with_tag("customer").with_detail(err.to_string()))
        })
}

/// Look up a customer by email address. Same absence contract as
/// [`find_customer_by_id`].
pub fn find_customer_by_email(
    email: &str,
    conn: &mut Connection,
) -> Result<Option<Customer>, ServiceError> {
    customers
        .filter(email_address.eq(email))
        .first::<Customer>(conn)
        .optional()
        .map_err(|err| {
            log::error!("Failed to look up customer by email: {}", err);
            ServiceError::internal_server_error("Failed to look up customer")
                .with_context(|ctx| ctx.with_tag("customer").with_detail(err.to_string()))
        })
}

/// The full customer list in storage order.
pub fn find_all_customers(conn: &mut Connection) -> Result<Vec<Customer>, ServiceError> {
    customers.load::<Customer>(conn).map_err(|err| {
        log::error!("Failed to list customers: {}", err);
        ServiceError::internal_server_error("Failed to list customers")
            .with_context(|ctx| ctx.with_tag("customer").with_detail(err.to_string()))
    })
}

/// Overwrite the five mutable fields of an existing row.
///
/// # Returns
///
/// `Ok(Customer)` with the persisted row on success.
/// `Err(ServiceError::NotFound)` if no row with the given id exists.
/// `Err(ServiceError)` with a conflict when the new email is already taken.
pub fn update_customer(
    customer_id: Uuid,
    changes: CustomerChangeset,
    conn: &mut Connection,
) -> Result<Customer, ServiceError> {
    diesel::update(customers.filter(id.eq(customer_id)))
        .set(changes)
        .get_result::<Customer>(conn)
        .map_err(|err| match err {
            diesel::result::Error::NotFound => {
                ServiceError::not_found(constants::MESSAGE_CUSTOMER_NOT_FOUND)
                    .with_context(|ctx| ctx.with_tag("customer"))
            }
            _ => {
                log::debug!("Failed to update customer {}: {}", customer_id, err);
                classify_write_error(err, "update customer")
            }
        })
}

/// Delete a customer row by id. Deleting a missing id is not an error; the
/// affected row count is returned as-is.
pub fn delete_customer_by_id(
    customer_id: Uuid,
    conn: &mut Connection,
) -> Result<usize, ServiceError> {
    diesel::delete(customers.filter(id.eq(customer_id)))
        .execute(conn)
        .map_err(|err| {
            log::error!("Failed to delete customer {}: {}", customer_id, err);
            ServiceError::internal_server_error("Failed to delete customer")
                .with_context(|ctx| ctx.with_tag("customer").with_detail(err.to_string()))
        })
}
