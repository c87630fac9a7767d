use std::fs::File;
use std::panic;

use errwatch_lib::{
    AppShell, CaptureConfig, ComponentInfo, Element, ErrorCapture, PromiseRejection, RaisedError,
    ResourceError, ScriptError, SharedLocation, Window, WindowEvent, install_panic_hook,
};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use tokio::sync::mpsc;

/// Events the host loop feeds into the app and the global scope.
enum HostEvent {
    /// Render a component; `fail` makes its render function return an error.
    Render { component: ComponentInfo, fail: bool },
    /// A component's event handler panics.
    HandlerPanic { component: ComponentInfo },
    Script(ScriptError),
    Window(WindowEvent),
    /// Code outside any component panics.
    Crash,
    Quit,
}

fn render(component: &ComponentInfo, fail: bool) -> Result<String, RaisedError> {
    let name = component.name.as_deref().unwrap_or("component");
    if fail {
        let message = format!("Cannot read properties of undefined (reading '{}')", name);
        let stack = format!(
            "TypeError: {}\n    at render ({}.vue?t=1700000000:14:21)\n    \
             at renderComponentRoot (runtime-core.js:890:16)",
            message, name
        );
        return Err(RaisedError::new("TypeError", message).with_stack(stack));
    }
    Ok(format!("<{}/>", name))
}

fn scripted_events() -> Vec<HostEvent> {
    vec![
        HostEvent::Render {
            component: ComponentInfo::root(),
            fail: false,
        },
        HostEvent::Render {
            component: ComponentInfo::named("UserCard").file("src/components/UserCard.vue"),
            fail: true,
        },
        HostEvent::HandlerPanic {
            component: ComponentInfo::default().tag("save-button"),
        },
        HostEvent::Script(
            ScriptError::new("Uncaught ReferenceError: chart is not defined")
                .source("https://app.example.com/assets/dashboard.js")
                .position(88, 12),
        ),
        HostEvent::Script(ScriptError::new("Script error.")),
        HostEvent::Window(WindowEvent::UnhandledRejection(PromiseRejection::new(
            "request to /api/profile failed",
        ))),
        HostEvent::Window(WindowEvent::Error(ResourceError::new(
            Element::new("IMG")
                .outer_html(r#"<img src="/static/avatar.png">"#)
                .current_src("https://app.example.com/static/avatar.png"),
        ))),
        HostEvent::Crash,
        HostEvent::Quit,
    ]
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let log_file = File::create("errwatch-demo.log").expect("Failed to create log file");
    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Info,
            Config::default(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, Config::default(), log_file),
    ])
    .expect("Failed to initialize logger");

    let location = SharedLocation::parse("https://app.example.com/dashboard")
        .expect("Invalid page location");
    let capture = ErrorCapture::builder()
        .location(location.clone())
        .config(CaptureConfig::new().stamp_time())
        .build()
        .expect("Failed to build error capture");

    let mut app = AppShell::new("dashboard");
    let mut window = Window::new();
    capture.install(&mut app, &mut window);
    install_panic_hook(capture);
    app.mount("#app");

    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        for event in scripted_events() {
            if tx.send(event).is_err() {
                break;
            }
        }
    });

    while let Some(event) = rx.recv().await {
        match event {
            HostEvent::Render { component, fail } => {
                let rendered = app.run(&component, "render function", || render(&component, fail));
                if let Some(html) = rendered {
                    log::debug!("Rendered {}", html);
                }
            }
            HostEvent::HandlerPanic { component } => {
                let _: Option<()> = app.run(&component, "component event handler", || {
                    panic!("save handler called before form was ready")
                });
            }
            HostEvent::Script(error) => {
                if !window.dispatch_script_error(error) {
                    log::debug!("Default handling suppressed");
                }
            }
            HostEvent::Window(event) => {
                window.dispatch_event(&event);
            }
            HostEvent::Crash => {
                if location.navigate("/dashboard/settings").is_err() {
                    log::warn!("Navigation failed");
                }
                let _ = panic::catch_unwind(|| {
                    let widgets: Vec<u32> = Vec::new();
                    widgets[3]
                });
            }
            HostEvent::Quit => break,
        }
    }

    log::info!("Host loop finished");
}
