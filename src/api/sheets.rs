use serde::Deserialize;

use crate::{
    client::NewsDesk,
    error::{ClientError, ResponseError},
    http::{HttpClient, HttpRequest},
};

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

impl NewsDesk {
    /// Reads one tab of the configured spreadsheet as a 2-D array of string
    /// cells, header row included. A payload with no data rows is reported
    /// as an empty response so the fetch cycle can abort.
    pub async fn fetch_sheet_values(&self, tab: &str) -> Result<Vec<Vec<String>>, ClientError> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.endpoints.sheets,
            self.config.sheet_id,
            urlencoding::encode(tab)
        );
        let req = HttpRequest::get(url).query("key", &self.config.sheets_api_key);
        let range: ValueRange = self.request(req).await?;
        if range.values.len() <= 1 {
            return Err(ResponseError::EmptyResponse.into());
        }
        Ok(range.values)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::test_support::desk_for;

    #[tokio::test]
    async fn returns_rows_including_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v4/spreadsheets/sheet-1/values/news"))
            .and(query_param("key", "sheets-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "range": "news!A1:O3",
                "values": [
                    ["title", "keyword"],
                    ["기사 하나", "AI"],
                ]
            })))
            .mount(&server)
            .await;

        let desk = desk_for(&server.uri());
        let rows = desk.fetch_sheet_values("news").await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "기사 하나");
    }

    #[tokio::test]
    async fn header_only_payload_is_an_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "values": [["title", "keyword"]]
            })))
            .mount(&server)
            .await;

        let desk = desk_for(&server.uri());
        let err = desk.fetch_sheet_values("news").await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::ResponseError(ResponseError::EmptyResponse)
        ));
    }
}
