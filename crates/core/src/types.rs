/// All database primary keys are PostgreSQL SERIAL.
pub type DbId = i32;

/// Identifiers and page numbers accepted at the HTTP boundary are unsigned 8-bit.
pub type PublicId = u8;
