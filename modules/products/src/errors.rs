//! Error catalog for the products REST surface.

use modkit_errors::ErrDef;

pub const PRODUCTS_VALIDATION: ErrDef = ErrDef {
    status: 400,
    title: "Validation error",
    code: "PRODUCTS_VALIDATION",
    type_url: "https://errors.example.com/PRODUCTS_VALIDATION",
};

pub const PRODUCTS_NOT_FOUND: ErrDef = ErrDef {
    status: 404,
    title: "Product not found",
    code: "PRODUCTS_NOT_FOUND",
    type_url: "https://errors.example.com/PRODUCTS_NOT_FOUND",
};

pub const INTERNAL: ErrDef = ErrDef {
    status: 500,
    title: "Internal error",
    code: "INTERNAL",
    type_url: "https://errors.example.com/INTERNAL",
};

/// Detail sent for every 500; internal causes stay in the logs.
pub const SERVER_ERROR_DETAIL: &str = "Server Error";

/// Detail sent for every 404.
pub const NOT_FOUND_DETAIL: &str = "Product not found";

pub const ALL: [ErrDef; 3] = [PRODUCTS_VALIDATION, PRODUCTS_NOT_FOUND, INTERNAL];
