//! HTML for the front page.

use anyhow::Result;
use chrono::{DateTime, Utc};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use std::time::Duration;

use crate::models::StoryItem;

const STYLE: &str = "body{font-family:Verdana,Geneva,sans-serif;background:#f6f6ef;margin:0}\
.page{max-width:860px;margin:0 auto;padding:16px 24px}\
h1{font-size:20px;color:#ff6600}\
li{margin-bottom:10px}\
a{color:#000;text-decoration:none}\
.host,.meta,.time{color:#828282;font-size:12px}";

/// Values the page is rendered from.
pub struct TemplateData<'a> {
    pub stories: &'a [StoryItem],
    pub elapsed: Duration,
}

/// Renders the story list. `now` is used for the "posted ... ago" labels.
pub fn render_page(data: &TemplateData<'_>, now: DateTime<Utc>) -> Result<String> {
    let mut html = String::with_capacity(512 + data.stories.len() * 256);

    write!(
        html,
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Quiet Hacker News</title>\n<style>{}</style>\n</head>\n\
         <body>\n<div class=\"page\">\n<h1>Quiet Hacker News</h1>\n<ol>\n",
        STYLE
    )?;

    for story in data.stories {
        write!(
            html,
            "<li><a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(&story.item.url),
            encode_text(&story.item.title)
        )?;
        if !story.host.is_empty() {
            write!(html, " <span class=\"host\">({})</span>", encode_text(&story.host))?;
        }
        writeln!(
            html,
            "<br><span class=\"meta\">{} points by {} {} | {} comments</span></li>",
            story.item.score,
            encode_text(&story.item.by),
            story.time_ago(now),
            story.item.comments_count
        )?;
    }

    write!(
        html,
        "</ol>\n<p class=\"time\">This page was rendered in {:?}</p>\n</div>\n</body>\n</html>\n",
        data.elapsed
    )?;

    Ok(html)
}
