// Messages
pub const MESSAGE_OK: &str = "ok";
pub const MESSAGE_CUSTOMER_CREATED: &str = "Customer created";
pub const MESSAGE_CUSTOMER_DELETED: &str = "Customer deleted";
pub const MESSAGE_CUSTOMER_NOT_FOUND: &str = "Customer not found";
pub const MESSAGE_EMAIL_EXISTS: &str = "Customer email already exists";
pub const MESSAGE_INVALID_CUSTOMER_ID: &str = "Invalid customer Id provided";
pub const MESSAGE_INVALID_FIRST_NAME: &str = "Invalid first name provided";
pub const MESSAGE_INVALID_LAST_NAME: &str = "Invalid last name provided";
pub const MESSAGE_INVALID_EMAIL: &str = "Invalid email address provided";
pub const MESSAGE_INVALID_PHONE: &str = "Invalid phone number provided";
pub const MESSAGE_INTERNAL_SERVER_ERROR: &str = "Internal Server Error";

// Misc
pub const EMPTY: &str = "";
