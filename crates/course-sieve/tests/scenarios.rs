use std::cell::RefCell;

use course_sieve::{
    compute_window, export_message, format_for_display, ApiClient, ApiEndpoints, BusySet, Course,
    Environment, HttpResponse, LocalCatalog, PeriodTable, RenderOrchestrator, ResultView,
    SieveConfig, SieveError, Transport, ViewportConfig, Weekday,
};

fn course(code: &str, time: &str) -> Course {
    Course {
        code: code.to_string(),
        name: format!("Course {code}"),
        teacher: "Chen".to_string(),
        credits: 3,
        time: time.to_string(),
        classroom: "E6-A203".to_string(),
        course_type: "選修".to_string(),
        semester: "半".to_string(),
        ..Course::default()
    }
}

/// A course service double backed by a local catalog.
struct FakeService {
    catalog: LocalCatalog,
    requests: RefCell<Vec<String>>,
}

impl Transport for FakeService {
    fn post_json(&self, url: &str, body: &str) -> Result<HttpResponse, SieveError> {
        self.requests.borrow_mut().push(url.to_string());
        if url.ends_with("/api/filter-courses") {
            let request: course_sieve::FilterRequest = serde_json::from_str(body)?;
            let query = course_sieve::SearchQuery::new(
                &request.department,
                request.grade,
                request.busy_set()?,
            );
            let courses = course_sieve::SearchStrategy::search(&self.catalog, &query)?;
            let body = serde_json::json!({ "success": true, "count": courses.len(), "courses": courses });
            Ok(HttpResponse::new(200, body.to_string()))
        } else if url.ends_with("/api/download-courses") {
            Ok(HttpResponse::new(200, b"PK-spreadsheet".to_vec()))
        } else {
            Ok(HttpResponse::new(404, Vec::new()))
        }
    }
}

#[test]
fn evening_busy_slot_excludes_monday_evening_course() {
    let table = PeriodTable::standard();
    assert_eq!(table.len(), 14);

    let busy = BusySet::from_wire_keys(["1-A"]).unwrap();
    let courses = vec![course("MON-A", "一A"), course("WED-1", "三1")];
    let kept = course_sieve::filter(&courses, &busy, &table);

    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].code, "WED-1");
}

#[test]
fn window_for_hundred_rows_at_700px() {
    let config = ViewportConfig {
        row_height: 70.0,
        visible_count: 12,
        buffer_count: 3,
    };
    let window = compute_window(&config, 700.0, 100);
    assert_eq!(window.start, 7);
    assert_eq!(window.end, 25);
    assert_eq!(window.vertical_offset, 490.0);
}

#[test]
fn empty_result_collapses_window_and_selection() {
    let mut app = RenderOrchestrator::new(PeriodTable::standard(), ViewportConfig::default());
    app.load_results(vec![course("A", "一1")]);
    app.set_all_selected(true);
    app.load_results(Vec::new());

    let frame = app.render();
    assert_eq!(frame.window.start, 0);
    assert_eq!(frame.window.end, 0);
    assert_eq!(frame.window.reserved_height, 0.0);
    assert_eq!(frame.selected_count, 0);
    assert!(matches!(frame.view, ResultView::Empty { .. }));
}

#[test]
fn display_format_of_multi_token_time() {
    assert_eq!(
        format_for_display("一234,三5", &PeriodTable::standard()),
        "週一 2,3,4 / 週三 5"
    );
}

#[test]
fn full_session_against_course_service() {
    let mut catalog: Vec<Course> = (0..250)
        .map(|i| course(&format!("C{i:03}"), if i % 5 == 0 { "一A" } else { "三1" }))
        .collect();
    catalog.push(course("EXT", "五EF"));

    let service = FakeService {
        catalog: LocalCatalog::new(catalog, PeriodTable::standard()),
        requests: RefCell::new(Vec::new()),
    };

    let config = SieveConfig::default();
    let environment = Environment::detect("localhost", "http:");
    let client = ApiClient::new(&service, config.api.base_url(environment));
    let mut app = RenderOrchestrator::from_config(&config).unwrap();

    // Busy on Monday evening: every fifth course drops out.
    assert_eq!(app.toggle_busy(Weekday::Monday, 'A'), Some(true));
    app.run_search(&client, "", 1).unwrap();

    let frame = app.render();
    assert_eq!(frame.course_count, 201);
    match &frame.view {
        ResultView::Rows { rows } => {
            assert_eq!(rows.len(), 15);
            assert_eq!(rows[0].course.code, "C001");
            assert_eq!(rows[0].time_display, "週三 1");
        }
        other => panic!("expected rows, got {other:?}"),
    }

    // Pick one row, scroll far away, select nothing else, export.
    assert_eq!(app.toggle_row("C003"), Some(true));
    assert!(app.on_scroll(10_000.0));
    assert_eq!(app.render().selected_count, 1);

    let outcome = app.run_export(&client);
    assert_eq!(export_message(&outcome), "成功下載 1 門課程！");
    assert_eq!(outcome.unwrap().bytes, b"PK-spreadsheet");

    let requests = service.requests.borrow();
    assert_eq!(
        requests.as_slice(),
        [
            "http://localhost:3000/api/filter-courses",
            "http://localhost:3000/api/download-courses",
        ]
    );
}

#[test]
fn production_environment_uses_production_endpoint() {
    let endpoints = ApiEndpoints::default();
    let environment = Environment::detect("ncu-courses.example.com", "https:");
    assert_eq!(
        endpoints.base_url(environment),
        "https://ncu-courses-select.onrender.com"
    );
}
