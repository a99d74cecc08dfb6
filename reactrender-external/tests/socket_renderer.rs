//! ExternalServerRenderer against an in-process Unix socket server.

use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use reactrender_core::{
    Props, RegisteredStores, ReactRenderer, RenderCall, RenderEnvironment, RenderError,
    RenderOptions, RenderResult, Rendering, RequestContext,
};
use reactrender_external::{ExternalError, ExternalServerRenderer, RenderMessage, RenderReply};
use tempfile::TempDir;

/// Serve `replies.len()` connections, answering each with the next reply.
/// The join handle yields every message received.
fn serve(socket: PathBuf, replies: Vec<Option<RenderReply>>) -> JoinHandle<Vec<RenderMessage>> {
    let listener = UnixListener::bind(&socket).expect("bind");
    thread::spawn(move || {
        let mut received = Vec::new();
        for reply in replies {
            let (stream, _) = listener.accept().expect("accept");
            let mut reader = BufReader::new(stream.try_clone().expect("clone"));
            let mut line = String::new();
            reader.read_line(&mut line).expect("read");
            received.push(serde_json::from_str(line.trim_end()).expect("message json"));
            if let Some(reply) = reply {
                let mut stream = stream;
                let payload = serde_json::to_string(&reply).expect("reply json");
                stream.write_all(payload.as_bytes()).expect("write");
                stream.write_all(b"\n").expect("write newline");
            }
        }
        received
    })
}

fn call<'a>(stores: &'a RegisteredStores) -> RenderCall<'a> {
    RenderCall {
        component_name: "Greeter",
        props_json: r#"{"name":"Ada"}"#,
        dom_id: "sfreact-reactRenderer42",
        registered_stores: stores,
        trace: false,
    }
}

#[test]
fn renders_through_the_socket() {
    let tmp = TempDir::new().unwrap();
    let socket = tmp.path().join("render.sock");
    let server = serve(
        socket.clone(),
        vec![Some(RenderReply::ok(RenderResult::markup("<p>Hello Ada</p>")))],
    );

    let stores = RegisteredStores::new();
    let result = ExternalServerRenderer::new(&socket).render(&call(&stores)).unwrap();
    assert_eq!(result, RenderResult::markup("<p>Hello Ada</p>"));

    let received = server.join().unwrap();
    assert_eq!(received[0].component_name, "Greeter");
    assert_eq!(received[0].props, r#"{"name":"Ada"}"#);
    assert_eq!(received[0].dom_id, "sfreact-reactRenderer42");
    assert!(!received[0].static_markup);
}

#[test]
fn errors_are_returned_as_results_by_default() {
    let tmp = TempDir::new().unwrap();
    let socket = tmp.path().join("render.sock");
    let failed = RenderResult::failed("<pre>boom</pre>", "<script>console.error('boom')</script>");
    let server = serve(socket.clone(), vec![Some(RenderReply::ok(failed.clone()))]);

    let stores = RegisteredStores::new();
    let result = ExternalServerRenderer::new(&socket).render(&call(&stores)).unwrap();
    assert_eq!(result, failed);
    server.join().unwrap();
}

#[test]
fn fail_loud_turns_errors_into_failures() {
    let tmp = TempDir::new().unwrap();
    let socket = tmp.path().join("render.sock");
    let server = serve(
        socket.clone(),
        vec![Some(RenderReply::ok(RenderResult::failed("<pre>boom</pre>", "boom")))],
    );

    let stores = RegisteredStores::new();
    let err = ExternalServerRenderer::new(&socket)
        .with_fail_loud(true)
        .render(&call(&stores))
        .unwrap_err();
    match err {
        RenderError::Renderer { component, source } => {
            assert_eq!(component, "Greeter");
            let source = source.downcast::<ExternalError>().expect("external error");
            assert!(matches!(*source, ExternalError::FailLoud { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
    server.join().unwrap();
}

#[test]
fn server_closing_early_is_a_protocol_error() {
    let tmp = TempDir::new().unwrap();
    let socket = tmp.path().join("render.sock");
    let server = serve(socket.clone(), vec![None]);

    let stores = RegisteredStores::new();
    let err = ExternalServerRenderer::new(&socket)
        .render(&call(&stores))
        .unwrap_err();
    assert!(err.to_string().contains("closed connection"), "got: {err}");
    server.join().unwrap();
}

#[test]
fn coordinator_sends_stores_and_static_flag() {
    let tmp = TempDir::new().unwrap();
    let socket = tmp.path().join("render.sock");
    let server = serve(
        socket.clone(),
        vec![
            Some(RenderReply::ok(RenderResult::markup("<nav>live</nav>"))),
            Some(RenderReply::ok(RenderResult::markup("<nav>static</nav>"))),
        ],
    );

    let renderer = ExternalServerRenderer::new(&socket);
    let env = RenderEnvironment::new(Arc::new(RequestContext::default()), Rendering::ServerSide)
        .with_static_renderer(Arc::new(renderer.static_markup()))
        .with_renderer(Arc::new(renderer));
    let mut pass = env.begin_pass();

    pass.register_store("session", &Props::from(r#"{"user":"ada"}"#))
        .unwrap();
    let live = pass.render_component("Nav", &RenderOptions::default()).unwrap();
    let frozen = pass
        .render_component_static("Nav", &RenderOptions::default())
        .unwrap();

    assert!(live.contains("<nav>live</nav>"));
    assert!(frozen.contains("<nav>static</nav>"));

    let received = server.join().unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].registered_stores["session"], r#"{"user":"ada"}"#);
    assert!(!received[0].static_markup);
    assert!(received[1].static_markup);
}
