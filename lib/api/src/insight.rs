use crate::error::{ApiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::sync::Arc;
use tripgraph_storage::InsightSource;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InsightRequest {
    #[serde(default)]
    pub route: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteStop {
    pub city: String,
    pub places: Vec<String>,
    pub food: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightResponse {
    pub status: &'static str,
    pub insight: String,
    pub cities: Vec<RouteStop>,
}

/// Travel notes for every city along a route.
#[derive(Clone)]
pub struct InsightService {
    source: Arc<dyn InsightSource>,
}

impl InsightService {
    pub fn new(source: Arc<dyn InsightSource>) -> Self {
        Self { source }
    }

    /// Cities with no catalog entry are skipped.
    pub fn route_insight(&self, request: &InsightRequest) -> Result<InsightResponse> {
        if request.route.len() < 2 {
            return Err(ApiError::BadRequest("Invalid route".to_string()));
        }

        let cities: Vec<RouteStop> = request
            .route
            .iter()
            .filter_map(|city| {
                self.source.lookup(city).map(|info| RouteStop {
                    city: city.clone(),
                    places: info.places,
                    food: info.food,
                })
            })
            .collect();

        Ok(InsightResponse {
            status: "success",
            insight: render(&cities),
            cities,
        })
    }
}

fn render(stops: &[RouteStop]) -> String {
    let mut text = String::from("Overall Shortest Path Travel Insights\n\n");
    for stop in stops {
        // Writing to a String cannot fail
        let _ = writeln!(text, "{}", stop.city);
        text.push_str("Places to Visit:\n");
        for place in &stop.places {
            let _ = writeln!(text, "• {}", place);
        }
        text.push_str("Famous Food:\n");
        for food in &stop.food {
            let _ = writeln!(text, "• {}", food);
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripgraph_storage::{CityInsight, StaticInsights};

    fn service() -> InsightService {
        let insights: StaticInsights = [(
            "Pune".to_string(),
            CityInsight {
                places: vec!["Shaniwar Wada".into()],
                food: vec!["Misal Pav".into()],
            },
        )]
        .into_iter()
        .collect();
        InsightService::new(Arc::new(insights))
    }

    fn route(cities: &[&str]) -> InsightRequest {
        InsightRequest {
            route: cities.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn test_short_route_rejected() {
        let err = service().route_insight(&route(&["Pune"])).unwrap_err();
        assert_eq!(err, ApiError::BadRequest("Invalid route".into()));
    }

    #[test]
    fn test_unknown_cities_skipped() {
        let response = service().route_insight(&route(&["Pune", "Nowhere"])).unwrap();
        assert_eq!(response.cities.len(), 1);
        assert_eq!(response.cities[0].city, "Pune");
        assert!(response.insight.contains("• Shaniwar Wada"));
        assert!(response.insight.contains("• Misal Pav"));
        assert!(!response.insight.contains("Nowhere"));
    }
}
