//! 服务层模块

mod prompt_service;
mod recommendation_service;
pub mod schema;

pub use recommendation_service::{ConfiguredRecommender, RecommendError, Recommender};

#[cfg(test)]
pub(crate) use recommendation_service::parse_response;
