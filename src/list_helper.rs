//! Statistics over an in-memory list of blogs.
//!
//! Every function is pure. An empty list yields `0` or `None`, never an error.
//! Authors are grouped by their exact `author` value, so blogs without an
//! author form a group of their own, separate from blogs whose author is `""`.
//! Ties go to whichever candidate comes first: the earliest blog in the input,
//! or the author group that first appeared earliest.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::models::Blog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorBlogs {
    pub author: Option<String>,
    pub blogs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorLikes {
    pub author: Option<String>,
    pub likes: u64,
}

/// Sum of all likes, saturating at `u64::MAX`.
pub fn total_likes(blogs: &[Blog]) -> u64 {
    blogs
        .iter()
        .fold(0u64, |sum, blog| sum.saturating_add(blog.likes))
}

/// The most-liked blog; the earliest one wins a tie.
pub fn favorite_blog(blogs: &[Blog]) -> Option<&Blog> {
    blogs
        .iter()
        .reduce(|best, blog| if blog.likes > best.likes { blog } else { best })
}

/// The author with the most blogs; the author seen first wins a tie.
pub fn most_blogs(blogs: &[Blog]) -> Option<AuthorBlogs> {
    let (author, count) = max_group(group_by_author(blogs, |count: &mut usize, _| *count += 1))?;
    Some(AuthorBlogs {
        author: author.map(str::to_string),
        blogs: count,
    })
}

/// The author with the most likes summed over their blogs, saturating at
/// `u64::MAX`; the author seen first wins a tie.
pub fn most_likes(blogs: &[Blog]) -> Option<AuthorLikes> {
    let (author, likes) = max_group(group_by_author(blogs, |sum: &mut u64, blog| {
        *sum = sum.saturating_add(blog.likes)
    }))?;
    Some(AuthorLikes {
        author: author.map(str::to_string),
        likes,
    })
}

/// Fold blogs into per-author accumulators, in order of each author's first appearance.
fn group_by_author<'a, T, F>(blogs: &'a [Blog], mut fold: F) -> Vec<(Option<&'a str>, T)>
where
    T: Default,
    F: FnMut(&mut T, &Blog),
{
    let mut groups: Vec<(Option<&str>, T)> = Vec::new();
    let mut index: HashMap<Option<&str>, usize> = HashMap::new();

    for blog in blogs {
        let key = blog.author.as_deref();
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, T::default()));
            groups.len() - 1
        });
        fold(&mut groups[slot].1, blog);
    }

    groups
}

fn max_group<K, T: PartialOrd>(groups: Vec<(K, T)>) -> Option<(K, T)> {
    groups
        .into_iter()
        .reduce(|best, group| if group.1 > best.1 { group } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog(id: &str, title: &str, author: Option<&str>, likes: u64) -> Blog {
        Blog {
            id: id.to_string(),
            title: title.to_string(),
            author: author.map(str::to_string),
            url: format!("http://example.com/{}", id),
            likes,
            user: String::new(),
        }
    }

    fn list_with_one_blog() -> Vec<Blog> {
        vec![blog(
            "5a422aa71b54a676234d17f8",
            "Go To Statement Considered Harmful",
            Some("Edsger W. Dijkstra"),
            5,
        )]
    }

    fn bigger_blog_list() -> Vec<Blog> {
        vec![
            blog("5a422a851b54a676234d17f7", "React patterns", Some("Michael Chan"), 7),
            blog(
                "5a422aa71b54a676234d17f8",
                "Go To Statement Considered Harmful",
                Some("Edsger W. Dijkstra"),
                5,
            ),
            blog(
                "5a422b3a1b54a676234d17f9",
                "Canonical string reduction",
                Some("Edsger W. Dijkstra"),
                12,
            ),
            blog("5a422b891b54a676234d17fa", "First class tests", Some("Robert C. Martin"), 10),
            blog("5a422ba71b54a676234d17fb", "TDD harms architecture", Some("Robert C. Martin"), 0),
            blog("5a422bc61b54a676234d17fc", "Type wars", Some("Robert C. Martin"), 2),
        ]
    }

    #[test]
    fn total_likes_of_empty_list_is_zero() {
        assert_eq!(total_likes(&[]), 0);
    }

    #[test]
    fn total_likes_of_single_blog_is_its_likes() {
        assert_eq!(total_likes(&list_with_one_blog()), 5);
    }

    #[test]
    fn total_likes_of_bigger_list() {
        assert_eq!(total_likes(&bigger_blog_list()), 36);

        let mut reversed = bigger_blog_list();
        reversed.reverse();
        assert_eq!(total_likes(&reversed), 36);
    }

    #[test]
    fn like_sums_saturate_instead_of_overflowing() {
        let blogs = vec![
            blog("1", "a", Some("Dijkstra"), u64::MAX),
            blog("2", "b", Some("Dijkstra"), u64::MAX),
            blog("3", "c", Some("Martin"), 1),
        ];
        assert_eq!(total_likes(&blogs), u64::MAX);
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: Some("Dijkstra".to_string()),
                likes: u64::MAX,
            })
        );
    }

    #[test]
    fn favorite_of_empty_list_is_none() {
        assert_eq!(favorite_blog(&[]), None);
    }

    #[test]
    fn favorite_of_single_blog_is_that_blog() {
        let blogs = list_with_one_blog();
        assert_eq!(favorite_blog(&blogs), Some(&blogs[0]));
    }

    #[test]
    fn favorite_of_bigger_list() {
        let blogs = bigger_blog_list();
        let favorite = favorite_blog(&blogs).unwrap();
        assert_eq!(favorite.title, "Canonical string reduction");
        assert_eq!(favorite.likes, 12);
        assert!(blogs.iter().all(|b| b.likes <= favorite.likes));
    }

    #[test]
    fn favorite_tie_keeps_earliest() {
        let blogs = vec![
            blog("1", "first", Some("a"), 3),
            blog("2", "second", Some("b"), 9),
            blog("3", "third", Some("c"), 9),
        ];
        assert_eq!(favorite_blog(&blogs).unwrap().id, "2");
    }

    #[test]
    fn most_blogs_of_empty_list_is_none() {
        assert_eq!(most_blogs(&[]), None);
    }

    #[test]
    fn most_blogs_of_single_blog() {
        assert_eq!(
            most_blogs(&list_with_one_blog()),
            Some(AuthorBlogs {
                author: Some("Edsger W. Dijkstra".to_string()),
                blogs: 1,
            })
        );
    }

    #[test]
    fn most_blogs_of_bigger_list() {
        assert_eq!(
            most_blogs(&bigger_blog_list()),
            Some(AuthorBlogs {
                author: Some("Robert C. Martin".to_string()),
                blogs: 3,
            })
        );
    }

    #[test]
    fn most_likes_of_empty_list_is_none() {
        assert_eq!(most_likes(&[]), None);
    }

    #[test]
    fn most_likes_of_single_blog() {
        assert_eq!(
            most_likes(&list_with_one_blog()),
            Some(AuthorLikes {
                author: Some("Edsger W. Dijkstra".to_string()),
                likes: 5,
            })
        );
    }

    #[test]
    fn most_likes_of_bigger_list() {
        assert_eq!(
            most_likes(&bigger_blog_list()),
            Some(AuthorLikes {
                author: Some("Edsger W. Dijkstra".to_string()),
                likes: 17,
            })
        );
    }

    #[test]
    fn author_stats_over_mixed_order() {
        let blogs = vec![
            blog("1", "a", Some("Dijkstra"), 5),
            blog("2", "b", Some("Dijkstra"), 12),
            blog("3", "c", Some("Martin"), 10),
            blog("4", "d", Some("Martin"), 0),
            blog("5", "e", Some("Martin"), 2),
            blog("6", "f", Some("Chan"), 7),
        ];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: Some("Martin".to_string()),
                blogs: 3,
            })
        );
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: Some("Dijkstra".to_string()),
                likes: 17,
            })
        );
    }

    #[test]
    fn author_ties_go_to_first_seen_group() {
        let blogs = vec![
            blog("1", "a", Some("Chan"), 4),
            blog("2", "b", Some("Martin"), 1),
            blog("3", "c", Some("Martin"), 3),
            blog("4", "d", Some("Chan"), 0),
        ];
        assert_eq!(most_blogs(&blogs).unwrap().author.as_deref(), Some("Chan"));
        assert_eq!(most_likes(&blogs).unwrap().author.as_deref(), Some("Chan"));
    }

    #[test]
    fn grouping_is_case_sensitive() {
        let blogs = vec![
            blog("1", "a", Some("martin"), 1),
            blog("2", "b", Some("Martin"), 1),
            blog("3", "c", Some("Martin"), 1),
        ];
        assert_eq!(
            most_blogs(&blogs),
            Some(AuthorBlogs {
                author: Some("Martin".to_string()),
                blogs: 2,
            })
        );
    }

    #[test]
    fn missing_and_empty_authors_are_separate_groups() {
        let blogs = vec![
            blog("1", "a", None, 1),
            blog("2", "b", Some(""), 5),
            blog("3", "c", None, 1),
        ];
        assert_eq!(most_blogs(&blogs), Some(AuthorBlogs { author: None, blogs: 2 }));
        assert_eq!(
            most_likes(&blogs),
            Some(AuthorLikes {
                author: Some(String::new()),
                likes: 5,
            })
        );
    }
}
