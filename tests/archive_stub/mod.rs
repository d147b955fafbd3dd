use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Route {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Route {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            delay: Duration::ZERO,
        }
    }

    #[allow(dead_code)]
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            delay: Duration::ZERO,
        }
    }

    #[allow(dead_code)]
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub url: String,
    pub user_agent: Option<String>,
}

/// Serves fixed pages keyed by request path + query; anything else is a 404.
pub struct ArchiveStub {
    pub base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    shutdown_tx: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ArchiveStub {
    pub fn spawn(routes: Vec<(&str, Route)>) -> Self {
        let routes: HashMap<String, Route> = routes
            .into_iter()
            .map(|(path, route)| (path.to_owned(), route))
            .collect();

        let server = tiny_http::Server::http("127.0.0.1:0").expect("start archive stub server");
        let addr = server.server_addr();
        let base_url = format!("http://{addr}/");

        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_by_server = Arc::clone(&seen);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || {
            loop {
                if shutdown_rx.try_recv().is_ok() {
                    break;
                }

                let request = match server.recv_timeout(Duration::from_millis(50)) {
                    Ok(Some(req)) => req,
                    Ok(None) => continue,
                    Err(_) => break,
                };

                let url = request.url().to_owned();
                let user_agent = request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv("User-Agent"))
                    .map(|header| header.value.as_str().to_owned());
                seen_by_server
                    .lock()
                    .expect("lock seen requests")
                    .push(SeenRequest {
                        url: url.clone(),
                        user_agent,
                    });

                let route = routes.get(&url).cloned().unwrap_or(Route {
                    status: 404,
                    body: "not found".to_owned(),
                    delay: Duration::ZERO,
                });
                if !route.delay.is_zero() {
                    thread::sleep(route.delay);
                }

                let header = tiny_http::Header::from_bytes(
                    &b"Content-Type"[..],
                    &b"text/html; charset=utf-8"[..],
                )
                .expect("build header");
                let response = tiny_http::Response::from_string(route.body)
                    .with_status_code(route.status)
                    .with_header(header);
                let _ = request.respond(response);
            }
        });

        Self {
            base_url,
            seen,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("lock seen requests").clone()
    }
}

impl Drop for ArchiveStub {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

pub const TAG_ITEMS: &str = r#"<li class="relationships"><a class="tag" href="/tags/a">Ada/Bell</a></li>
    <li class="relationships"><a class="tag" href="/tags/b">Cole &amp; Dane</a></li>
    <li class="characters"><a class="tag" href="/tags/c">Ada</a></li>
    <li class="freeforms"><a class="tag" href="/tags/d">Fluff</a></li>"#;

pub fn blurb(id: &str, title: &str, tag_items: &str) -> String {
    format!(
        r#"<li id="work_{id}" class="work blurb group" role="article">
  <div class="header module">
    <h4 class="heading">
      <a href="/works/{id}">{title}</a>
      by
      <a rel="author" href="/users/quill/pseuds/quill">quill</a>
    </h4>
    <h5 class="fandoms heading">
      <span class="landmark">Fandoms:</span>
      <a class="tag" href="/tags/Sea%20Stories/works">Sea Stories</a>
    </h5>
  </div>
  <ul class="tags commas">
    <li class="warnings"><strong><a class="tag" href="/tags/None/works">No Archive Warnings Apply</a></strong></li>
    {tag_items}
  </ul>
  <blockquote class="userstuff summary"><p>Summary of {title}.</p></blockquote>
  <dl class="stats"><dt class="words">Words:</dt><dd class="words">1,204</dd></dl>
</li>"#
    )
}

pub fn canonical_page(entries: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Works</title></head><body>
<div id="outer"><div id="inner"><div id="main">
<ol class="work index group">
{entries}
</ol>
</div></div></div></body></html>"#
    )
}

#[allow(dead_code)]
pub fn profile_page(entries: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Tag</title></head><body>
<div id="outer"><div id="inner"><div id="main">
<div class="tag home profile">
<div class="work listbox group">
<ul class="index group">
{entries}
</ul>
</div></div>
</div></div></div></body></html>"#
    )
}

#[allow(dead_code)]
pub const UNSORTED_TAG_WORKS_PAGE: &str = r#"<!DOCTYPE html><html><body>
<div id="outer"><div id="inner"><div id="main"><p>This tag has not been marked common and can't be filtered on (yet).</p></div></div></div>
</body></html>"#;

pub fn work_page(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Work</title></head><body>
<div id="outer"><div id="inner"><div id="main">
<div id="workskin">
<div class="preface group">
  <h2 class="title heading">The Keeper's Log</h2>
  <h3 class="byline heading"><a rel="author" href="/users/quill/pseuds/quill">quill</a></h3>
  <div class="summary module"><blockquote class="userstuff"><p>Storm season.</p></blockquote></div>
  <div class="notes module"><blockquote class="userstuff"><p>For the crew.</p></blockquote></div>
</div>
<div id="chapters" role="article">
{body}
</div>
</div>
</div></div></div></body></html>"#
    )
}
