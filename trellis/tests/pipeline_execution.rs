//! Interceptor ordering and the guarded execution phases.

mod common;

use common::{
    CountingHandler, FailingHandler, RecordingRequestInterceptor, RecordingResponseInterceptor,
    TestError, body_text,
};
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};
use trellis::{
    App, BoxError, ErrorHandlersBuilder, Method, Request, Response, RoutesBuilder, Status,
};

fn recorder() -> Arc<Mutex<Vec<&'static str>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[tokio::test]
async fn request_interceptors_fire_root_to_leaf_for_matching_paths_only() {
    let log = recorder();
    let (foo_handler, _) = CountingHandler::new("foo");
    let (bar_handler, _) = CountingHandler::new("bar");
    let routes = RoutesBuilder::new()
        .add_request_interceptor("/", RecordingRequestInterceptor { log: log.clone(), tag: "root" })
        .unwrap()
        .add_request_interceptor("/foo", RecordingRequestInterceptor { log: log.clone(), tag: "foo" })
        .unwrap()
        .add_request_interceptor("/foo/{id}", RecordingRequestInterceptor { log: log.clone(), tag: "id" })
        .unwrap()
        .add_handler(Method::GET, "/foo/{id}", foo_handler)
        .unwrap()
        .add_handler(Method::GET, "/bar", bar_handler)
        .unwrap()
        .build();
    let app = App::builder().routes(routes).build().unwrap();

    app.handle(Request::new(Method::GET, "/foo/123")).await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["root", "foo", "id"]);

    // The sibling path only passes through the root scope.
    log.lock().unwrap().clear();
    app.handle(Request::new(Method::GET, "/bar")).await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["root"]);
}

#[tokio::test]
async fn response_interceptors_fire_leaf_to_root() {
    let log = recorder();
    let (handler, _) = CountingHandler::new("h");
    let routes = RoutesBuilder::new()
        .add_response_interceptor("/", RecordingResponseInterceptor { log: log.clone(), tag: "root" })
        .unwrap()
        .add_response_interceptor("/foo", RecordingResponseInterceptor { log: log.clone(), tag: "foo" })
        .unwrap()
        .add_response_interceptor("/foo/{id}", RecordingResponseInterceptor { log: log.clone(), tag: "id" })
        .unwrap()
        .add_handler(Method::GET, "/foo/{id}", handler)
        .unwrap()
        .build();
    let app = App::builder().routes(routes).build().unwrap();

    app.handle(Request::new(Method::GET, "/foo/123")).await.unwrap();
    assert_eq!(*log.lock().unwrap(), vec!["id", "foo", "root"]);
}

#[tokio::test]
async fn intercepted_request_reaches_the_handler() {
    async fn stamp(request: Request) -> Result<Request, BoxError> {
        Ok(request.with_header("x-stamp", "present"))
    }
    async fn echo_stamp(request: Request) -> Result<Response, BoxError> {
        let stamp = request
            .header("x-stamp")
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or_else(|| "missing".to_owned());
        Ok(Response::builder().utf8_body(stamp).build())
    }
    let routes = RoutesBuilder::new()
        .add_request_interceptor("/", stamp)
        .unwrap()
        .add_handler(Method::GET, "/echo", echo_stamp)
        .unwrap()
        .build();
    let app = App::builder().routes(routes).build().unwrap();

    let response = app.handle(Request::new(Method::GET, "/echo")).await.unwrap();
    assert_eq!(body_text(&response), "present");

    // Path parameters are injected before the interceptor phase runs.
    let routes = RoutesBuilder::new()
        .add_handler(Method::GET, "/items/{id}", |request: Request| async move {
            let id = request.path_parameter("id").unwrap_or("missing").to_owned();
            Ok::<Response, BoxError>(Response::builder().utf8_body(id).build())
        })
        .unwrap()
        .build();
    let app = App::builder().routes(routes).build().unwrap();
    let response = app
        .handle(Request::new(Method::GET, "/items/17"))
        .await
        .unwrap();
    assert_eq!(body_text(&response), "17");
}

#[tokio::test]
async fn handler_failure_is_dispatched_pre_response() {
    let routes = RoutesBuilder::new()
        .add_handler(Method::GET, "/boom", FailingHandler)
        .unwrap()
        .build();
    let app = App::builder().routes(routes).build().unwrap();

    let response = app.handle(Request::new(Method::GET, "/boom")).await.unwrap();
    assert_eq!(response.status(), Status::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(&response), "Internal Server Error");
}

#[tokio::test]
async fn failing_request_interceptor_reports_the_most_recent_valid_request() {
    async fn stamp(request: Request) -> Result<Request, BoxError> {
        Ok(request.with_header("x-stamp", "survived"))
    }
    async fn explode(_request: Request) -> Result<Request, BoxError> {
        Err(Box::new(TestError("interceptor blew up".to_owned())))
    }
    let (handler, calls) = CountingHandler::new("unreached");
    let routes = RoutesBuilder::new()
        .add_request_interceptor("/", stamp)
        .unwrap()
        .add_request_interceptor("/x", explode)
        .unwrap()
        .add_handler(Method::GET, "/x", handler)
        .unwrap()
        .build();
    // The catch-all echoes the request it was handed, proving the first
    // interceptor's work was retained.
    let error_handlers = ErrorHandlersBuilder::new()
        .pre_response_catch_all(|_error: &BoxError, request: &Request| {
            let stamp = request
                .header("x-stamp")
                .and_then(|values| values.first())
                .cloned()
                .unwrap_or_else(|| "missing".to_owned());
            Response::builder()
                .status(Status::INTERNAL_SERVER_ERROR)
                .utf8_body(stamp)
                .build()
        })
        .unwrap()
        .build()
        .unwrap();
    let app = App::builder()
        .routes(routes)
        .error_handlers(error_handlers)
        .build()
        .unwrap();

    let response = app.handle(Request::new(Method::GET, "/x")).await.unwrap();
    assert_eq!(body_text(&response), "survived");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failing_response_interceptor_prefers_its_exact_typed_handler() {
    async fn explode(_request: Request, _response: Response) -> Result<Response, BoxError> {
        Err(Box::new(TestError("response stage blew up".to_owned())))
    }
    let (handler, calls) = CountingHandler::new("h");
    let routes = RoutesBuilder::new()
        .add_response_interceptor("/x", explode)
        .unwrap()
        .add_handler(Method::GET, "/x", handler)
        .unwrap()
        .build();
    fn typed(_error: &TestError, _request: &Request, _response: &Response) -> Response {
        Response::builder()
            .status(Status::BAD_REQUEST)
            .utf8_body("typed")
            .build()
    }
    let error_handlers = ErrorHandlersBuilder::new()
        .on_post_response(typed)
        .unwrap()
        .post_response_catch_all(|_error: &BoxError, _request: &Request, _response: &Response| {
            Response::builder()
                .status(Status::INTERNAL_SERVER_ERROR)
                .utf8_body("catch-all")
                .build()
        })
        .unwrap()
        .build()
        .unwrap();
    let app = App::builder()
        .routes(routes)
        .error_handlers(error_handlers)
        .build()
        .unwrap();

    let response = app.handle(Request::new(Method::GET, "/x")).await.unwrap();
    assert_eq!(response.status(), Status::BAD_REQUEST);
    assert_eq!(body_text(&response), "typed");
    // The handler phase completed once before the response phase failed.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
