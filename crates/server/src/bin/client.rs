use serde::Serialize;

use domain::protocol::CommentView;

const BASE_URL: &str = "http://127.0.0.1:3000";
const SITE_URL: &str = "https://demo.example/hello-remarks/";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCommentRequest {
    author: String,
    content: String,
    site_url: String,
    parent_id: Option<String>,
}

#[derive(Serialize)]
struct EditCommentRequest {
    id: String,
    content: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = reqwest::Client::new();
    let comments_url = format!("{}/api/comments", BASE_URL);
    println!("Starting Remarks test client...");

    println!("\n[1/5] Posting a comment...");
    let payload = CreateCommentRequest {
        author: "Ferris".to_string(),
        content: "This is a message from the **Remarks** test client!".to_string(),
        site_url: SITE_URL.to_string(),
        parent_id: None,
    };
    let resp = client
        .post(&comments_url)
        .query(&[("parseMarkdown", "true")])
        .json(&payload)
        .send()
        .await?;
    if !resp.status().is_success() {
        println!("   -> ❌ Failed to send: {:?}", resp.text().await?);
        return Ok(());
    }
    let root_id: String = resp.json().await?;
    println!("   -> ✅ Created {}", root_id);

    println!("\n[2/5] Replying to it...");
    let reply = CreateCommentRequest {
        author: "Corro".to_string(),
        content: "Replying <script>alert('nope')</script>politely.".to_string(),
        site_url: SITE_URL.to_string(),
        parent_id: Some(root_id.clone()),
    };
    let reply_id: String = client
        .post(&comments_url)
        .json(&reply)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    println!("   -> ✅ Created reply {}", reply_id);

    println!("\n[3/5] Fetching comments list...");
    let comments: Vec<CommentView> = client
        .get(&comments_url)
        .query(&[("url", SITE_URL.trim_end_matches('/'))])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;
    println!("   -> Retrieved {} thread(s):", comments.len());
    for c in &comments {
        println!("      - [{}] {} ({}): {}", c.created_at, c.author, c.reply_id, c.content);
        for r in &c.replies {
            println!("          ↳ [{}] {} ({}): {}", r.created_at, r.author, r.reply_id, r.content);
        }
    }

    println!("\n[4/5] Editing the root comment...");
    let edit = EditCommentRequest {
        id: root_id.clone(),
        content: "Edited by the test client.".to_string(),
    };
    client
        .patch(&comments_url)
        .json(&edit)
        .send()
        .await?
        .error_for_status()?;
    println!("   -> ✅ Edited {}", root_id);

    println!("\n[5/5] Deleting the thread...");
    client
        .delete(&comments_url)
        .query(&[("id", root_id.as_str())])
        .send()
        .await?
        .error_for_status()?;
    println!("   -> ✅ Deleted {} and its replies", root_id);

    Ok(())
}
