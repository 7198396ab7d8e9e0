mod media;

pub use media::{
    CatalogItem, Category, Episode, Genre, Movie, Season, SearchResults, TvShow, VideoServer,
    VideoUnit,
};
