//! OptiFine download scraper.
//!
//! OptiFine is not on the catalog. The archive is reached in three hops:
//!
//! ```text
//! https://optifine.net/downloads        ">Minecraft <version><" heading,
//!                                       first colDownload link after it
//! http://optifine.net/adloadx?f=...     mirror page, downloadButton href
//! https://optifine.net/downloadx?f=...  the archive
//! ```
use super::SpecialArtifactSource;
use super::http::{self, Fetched};
use crate::error::CatalogError;

const DOWNLOADS_PAGE: &str = "https://optifine.net/downloads";
const MIRROR_HOST: &str = "http://optifine.net";
const DOWNLOAD_HOST: &str = "https://optifine.net/";

/// [`SpecialArtifactSource`] that scrapes optifine.net.
#[derive(Debug)]
pub struct OptifineSource {
    agent: ureq::Agent,
}

impl OptifineSource {
    /// Create a scraper with its own HTTP agent.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: http::agent(),
        }
    }

    fn page(&self, url: &str) -> Result<String, CatalogError> {
        match http::get_text(&self.agent, url, &[])? {
            Fetched::Found(body) => Ok(body),
            Fetched::NotFound => Err(CatalogError::SpecialArtifact(format!("{url} not found"))),
        }
    }
}

impl Default for OptifineSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SpecialArtifactSource for OptifineSource {
    fn fetch(&self, game_version: &str) -> Result<Vec<u8>, CatalogError> {
        let downloads = self.page(DOWNLOADS_PAGE)?;
        let mirror = mirror_url(&downloads, game_version).ok_or_else(|| {
            CatalogError::SpecialArtifact(format!("no OptiFine build listed for Minecraft {game_version}"))
        })?;
        let mirror_page = self.page(&mirror)?;
        let href = download_href(&mirror_page).ok_or_else(|| {
            CatalogError::SpecialArtifact(format!("no download button on {mirror}"))
        })?;
        http::get_bytes(&self.agent, &format!("{DOWNLOAD_HOST}{href}"))
    }
}

/// Value of the first `href` attribute at or after `from`, entity-decoded.
fn href_after(html: &str, from: usize) -> Option<String> {
    let rest = html.get(from..)?;
    let start = rest.find("href=")? + "href=".len();
    let rest = rest.get(start..)?;
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = rest.get(1..)?;
    let end = rest.find(quote)?;
    Some(rest.get(..end)?.replace("&amp;", "&"))
}

/// Mirror page URL for the newest build of `game_version` on the downloads page.
///
/// The `&x=` tracking suffix is dropped and the link is rebased on
/// `http://optifine.net`.
pub(crate) fn mirror_url(downloads_html: &str, game_version: &str) -> Option<String> {
    let heading = downloads_html.find(&format!(">Minecraft {game_version}<"))?;
    let column = heading + downloads_html.get(heading..)?.find("colDownload")?;
    let href = href_after(downloads_html, column)?;
    let path = href.rsplit(MIRROR_HOST).next()?;
    let path = path.split("&x=").next()?;
    Some(format!("{MIRROR_HOST}{path}"))
}

/// Relative href of the download button on a mirror page.
pub(crate) fn download_href(mirror_html: &str) -> Option<String> {
    let button = mirror_html.find("downloadButton")?;
    href_after(mirror_html, button)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    const DOWNLOADS: &str = r#"
<h2>Minecraft 1.20.2</h2>
<table class="downloadTable mainTable">
<tr class="downloadLine downloadLineMain">
<td class="colFile">OptiFine HD U I6</td>
<td class="colDownload"><a href="http://optifine.net/adloadx?f=OptiFine_1.20.2_HD_U_I6.jar&x=aa11">Download</a></td>
</tr>
</table>
<h2>Minecraft 1.20.1</h2>
<div class="note">Preview</div>
<table class="downloadTable mainTable">
<tr class="downloadLine downloadLineMain">
<td class="colFile">OptiFine HD U I6</td>
<td class="colMirror"><a href="http://optifine.net/mirror">(Mirror)</a></td>
<td class="colDownload"><a href="http://optifine.net/adloadx?f=OptiFine_1.20.1_HD_U_I6.jar&amp;x=bb22">Download</a></td>
</tr>
<tr class="downloadLine">
<td class="colDownload"><a href="http://optifine.net/adloadx?f=OptiFine_1.20.1_HD_U_I5.jar&x=cc33">Download</a></td>
</tr>
</table>
"#;

    const MIRROR: &str = r#"
<table><tr><td>
<span class="downloadButton"><a href='downloadx?f=OptiFine_1.20.1_HD_U_I6.jar&x=5f1e' onclick='onDownload()'>Download</a></span>
</td></tr></table>
"#;

    #[test]
    fn mirror_url_for_listed_version() {
        assert_eq!(
            mirror_url(DOWNLOADS, "1.20.1").as_deref(),
            Some("http://optifine.net/adloadx?f=OptiFine_1.20.1_HD_U_I6.jar")
        );
        assert_eq!(
            mirror_url(DOWNLOADS, "1.20.2").as_deref(),
            Some("http://optifine.net/adloadx?f=OptiFine_1.20.2_HD_U_I6.jar")
        );
    }

    #[test]
    fn mirror_url_requires_exact_heading() {
        assert!(mirror_url(DOWNLOADS, "1.20").is_none());
        assert!(mirror_url(DOWNLOADS, "1.8.9").is_none());
    }

    #[test]
    fn download_href_reads_single_quoted_link() {
        assert_eq!(
            download_href(MIRROR).as_deref(),
            Some("downloadx?f=OptiFine_1.20.1_HD_U_I6.jar&x=5f1e")
        );
        assert!(download_href("<html></html>").is_none());
    }
}
