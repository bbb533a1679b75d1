//! Wire types shared between the portfolio tracker frontend and its REST backend.

pub mod domain;
pub mod usecases;
