//! HTTP handler functions for the complaint map API.

use actix_web::{HttpResponse, ResponseError as _, web};
use complaint_map_server_models::{
    ApiHealth, ChartsQueryParams, DetailQueryParams, MapQueryParams,
};

use crate::error::ApiError;
use crate::views::{Dashboard, parse_cluster_id};

fn reject(route: &str, e: &ApiError) -> HttpResponse {
    log::warn!("{route}: {e}");
    e.error_response()
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/locale`
///
/// Every display string: titles, sidebar labels, detail field labels,
/// units, and legend text.
pub async fn locale(dashboard: web::Data<Dashboard>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.locale())
}

/// `GET /api/pages`
pub async fn pages(dashboard: web::Data<Dashboard>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.pages())
}

/// `GET /api/filters`
///
/// Zones, organizations, cluster ids, mode choices, and slider ranges.
pub async fn filters(dashboard: web::Data<Dashboard>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.filter_options())
}

/// `GET /api/map`
pub async fn map(
    dashboard: web::Data<Dashboard>,
    params: web::Query<MapQueryParams>,
) -> HttpResponse {
    match dashboard.map_view(&params) {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => reject("map", &e),
    }
}

/// `GET /api/charts`
pub async fn charts(
    dashboard: web::Data<Dashboard>,
    params: web::Query<ChartsQueryParams>,
) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.charts_view(&params))
}

/// `GET /api/clusters/{id}`
///
/// The cluster record with a fresh comment sample.
pub async fn cluster_detail(
    dashboard: web::Data<Dashboard>,
    path: web::Path<String>,
    params: web::Query<DetailQueryParams>,
) -> HttpResponse {
    let result = parse_cluster_id(&path)
        .and_then(|id| dashboard.detail_view(id, &params, &mut rand::rng()));

    match result {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => reject("cluster detail", &e),
    }
}

/// `GET /api/clusters/{id}/comments`
///
/// Redraws the comment sample only.
pub async fn cluster_comments(
    dashboard: web::Data<Dashboard>,
    path: web::Path<String>,
    params: web::Query<DetailQueryParams>,
) -> HttpResponse {
    let result =
        parse_cluster_id(&path).and_then(|id| dashboard.resample(id, &params, &mut rand::rng()));

    match result {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => reject("cluster comments", &e),
    }
}

/// `GET /api/methodology`
pub async fn methodology(dashboard: web::Data<Dashboard>) -> HttpResponse {
    HttpResponse::Ok().json(dashboard.methodology())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use complaint_map_cluster_models::{ClusterRecord, CommentSample};
    use complaint_map_data::Dataset;
    use serde_json::Value;

    use crate::locale::Locale;

    use super::*;

    fn dashboard() -> web::Data<Dashboard> {
        let clusters = vec![
            ClusterRecord {
                cluster_id: "3_1".parse().unwrap(),
                description: "ท่อระบายน้ำอุดตัน".to_string(),
                status: "เสร็จสิ้น".to_string(),
                organization: "Dept X".to_string(),
                zone: "A".to_string(),
                num_times: 12,
                latitude: 13.8,
                longitude: 100.6,
            },
            ClusterRecord {
                cluster_id: "10_2".parse().unwrap(),
                description: "ไฟทางดับ".to_string(),
                status: "รอรับเรื่อง".to_string(),
                organization: "Dept Y".to_string(),
                zone: "B".to_string(),
                num_times: 4,
                latitude: 13.7,
                longitude: 100.4,
            },
        ];
        let comments = ["a", "b", "c"]
            .into_iter()
            .map(|text| CommentSample {
                cluster: "3_1".parse().unwrap(),
                comment: text.to_string(),
            })
            .collect();
        let dataset = Dataset::new(clusters, comments).unwrap();
        web::Data::new(Dashboard::new(Arc::new(dataset), Locale::thai().unwrap()))
    }

    async fn get(uri: &str) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .app_data(dashboard())
                .configure(crate::configure),
        )
        .await;
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let (status, body) = get("/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["healthy"], true);
    }

    #[actix_web::test]
    async fn pages_are_listed_in_order() {
        let (_, body) = get("/api/pages").await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["map", "charts", "detail", "methodology"]);
    }

    #[actix_web::test]
    async fn map_defaults_to_point_layer_with_threshold() {
        let (status, body) = get("/api/map").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["layer"]["type"], "ScatterplotLayer");
        assert_eq!(body["rowCount"], 1);
        assert_eq!(body["mapStyleUrl"], "mapbox://styles/mapbox/streets-v11");
    }

    #[actix_web::test]
    async fn map_dash_means_no_zone() {
        let (_, body) = get("/api/map?zone=-&minOccurrences=1").await;
        assert_eq!(body["rowCount"], 2);
    }

    #[actix_web::test]
    async fn unknown_viz_mode_is_bad_request() {
        let (status, body) = get("/api/map?vizMode=hexbin").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("hexbin"));
    }

    #[actix_web::test]
    async fn locale_serves_sidebar_and_detail_labels() {
        let (status, body) = get("/api/locale").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page_selector"], "เลือกหน้าที่ต้องการแสดงผล");
        assert_eq!(body["sidebar"]["top_n"], "จำนวนอันดับสูงสุดที่ให้แสดง");
        assert_eq!(body["detail"]["select_cluster"], "เลือกหมายเลขของปัญหา");
        assert_eq!(body["charts"]["times_unit"], "ครั้ง");
    }

    #[actix_web::test]
    async fn malformed_numeric_query_gets_json_error() {
        for uri in ["/api/charts?topN=abc", "/api/clusters/3_1/comments?samples=-1"] {
            let (status, body) = get(uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            let message = body["error"].as_str().unwrap();
            assert!(message.contains("Malformed query"), "{uri}: {message}");
        }
    }

    #[actix_web::test]
    async fn charts_clamp_top_n() {
        let (status, body) = get("/api/charts?topN=99").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["topN"], 15);
        assert_eq!(body["table"]["rows"][0]["clusterId"], "3_1");
    }

    #[actix_web::test]
    async fn filters_list_commented_clusters() {
        let (_, body) = get("/api/filters").await;
        assert_eq!(body["clusterIds"], serde_json::json!(["3_1"]));
        assert_eq!(body["zones"], serde_json::json!(["A", "B"]));
    }

    #[actix_web::test]
    async fn detail_with_record_and_samples() {
        let (status, body) = get("/api/clusters/3_1?samples=3").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["record"]["numTimes"], 12);
        assert_eq!(body["samples"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn detail_for_cluster_without_comments() {
        let (status, body) = get("/api/clusters/10_2").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["commentCount"], 0);
        assert!(body["samples"].as_array().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn malformed_cluster_id_is_bad_request() {
        let (status, _) = get("/api/clusters/abc/comments").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_cluster_is_not_found() {
        let (status, _) = get("/api/clusters/8_8").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn resample_clamps_request() {
        let (status, body) = get("/api/clusters/3_1/comments?samples=40").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["requested"], 3);
        assert_eq!(body["samples"].as_array().unwrap().len(), 3);
    }

    #[actix_web::test]
    async fn methodology_has_two_points() {
        let (_, body) = get("/api/methodology").await;
        assert_eq!(body["points"].as_array().unwrap().len(), 2);
    }
}
