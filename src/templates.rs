use maud::{DOCTYPE, Markup, html};

use crate::entities::movie;

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(query: &str, movies: &[movie::Model]) -> String {
    page(
        "Movies",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-6xl mx-auto px-6 py-10" {
                    h1 class="text-3xl font-bold text-gray-900" { "Movies" }

                    form class="mt-6 flex gap-3" method="get" action="/" {
                        input class="flex-1 rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" type="search" name="q" value=(query) placeholder="Search by title or summary" aria-label="Search movies";
                        button class="rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search" }
                    }

                    @if movies.is_empty() {
                        div class="mt-8 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No movies found." }
                        }
                    } @else {
                        table class="mt-8 w-full bg-white shadow rounded-lg text-left text-sm" {
                            thead class="border-b text-gray-700" {
                                tr {
                                    th class="p-3" { "Thumbnail" }
                                    th class="p-3" { "Title" }
                                    th class="p-3" { "Year" }
                                    th class="p-3" { "Genre" }
                                    th class="p-3" { "Summary" }
                                }
                            }
                            tbody {
                                @for movie in movies {
                                    (movie_row(movie))
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}

pub fn error_page(message: String) -> String {
    page(
        "Error",
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { "Error" }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn movie_row(movie: &movie::Model) -> Markup {
    html! {
        tr class="border-b align-top" {
            td class="p-3 w-24" {
                @if let Some(src) = &movie.thumbnail {
                    img class="w-20 rounded" src=(src) alt=(movie.title) loading="lazy";
                }
            }
            td class="p-3 font-medium text-gray-900" { (movie.title) }
            td class="p-3 text-gray-700" { (movie.year) }
            td class="p-3 text-gray-700" { (movie.genre.as_deref().unwrap_or("-")) }
            td class="p-3 text-gray-600" { (movie.extract) }
        }
    }
}
