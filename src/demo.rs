//! The test-server handler shipped with the binary.
//!
//! GET serves configured static files, or a small HTML page with a form
//! that posts back to the server. POST echoes the submitted body.

use anyhow::Context as _;
use bytes::Bytes;
use tokio::io::AsyncWrite;
use tracing::info;

use crate::config::StaticFile;
use crate::http::handler::{Context, Handler};

pub struct DemoHandler {
    static_files: Vec<StaticFile>,
}

impl DemoHandler {
    pub fn new(static_files: Vec<StaticFile>) -> Self {
        Self { static_files }
    }

    fn static_file(&self, target: &str) -> Option<&StaticFile> {
        self.static_files.iter().find(|f| f.route == target)
    }

    async fn send_file<W>(&self, ctx: &mut Context<'_, W>, file: &StaticFile) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let mut fs = tokio::fs::File::open(&file.path)
            .await
            .with_context(|| format!("opening {}", file.path.display()))?;
        let len = fs.metadata().await?.len();

        ctx.writer.write_success(&file.content_type, len).await?;
        ctx.writer.flush().await?;
        ctx.writer.copy_from(&mut fs).await?;
        Ok(())
    }
}

impl Handler for DemoHandler {
    async fn handle_get<W>(&self, ctx: &mut Context<'_, W>) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        let request = ctx.request;
        let target = request.target.as_str();
        if let Some(file) = self.static_file(target) {
            return self.send_file(ctx, file).await;
        }

        info!("request: {}", target);
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

        let w = &mut *ctx.writer;
        w.write_success_html().await?;
        w.write_line("<html><body><h1>test server</h1>").await?;
        w.write_line(&format!("Current Time: {}", now)).await?;
        w.write_line(&format!("url : {}", escape_html(target))).await?;
        w.write_line("<form method=post action=/form>").await?;
        w.write_line("<input type=text name=foo value=foovalue>").await?;
        w.write_line("<input type=submit name=bar value=barvalue>").await?;
        w.write_line("</form>").await?;
        Ok(())
    }

    async fn handle_post<W>(&self, ctx: &mut Context<'_, W>, body: Bytes) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin + Send,
    {
        info!("POST request: {}", ctx.request.target);
        let data = String::from_utf8_lossy(&body);

        let w = &mut *ctx.writer;
        w.write_success_html().await?;
        w.write_line("<html><body><h1>test server</h1>").await?;
        w.write_line("<a href=/test>return</a><p>").await?;
        w.write_line(&format!("postbody: <pre>{}</pre>", escape_html(&data)))
            .await?;
        Ok(())
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html("<a href=\"x\">&</a>"),
            "&lt;a href=&quot;x&quot;&gt;&amp;&lt;/a&gt;"
        );
    }
}
