//! Tests for the recipe lifecycle service.

use std::sync::Arc;

use rstest::rstest;

use super::*;
use crate::domain::ports::{MockImageStore, MockRecipeRepository, MockUserRepository};
use crate::domain::{
    Age, Email, PersonName, SUPERUSER_ID, User, UserProfileFields,
};

type TestService = RecipeLifecycleService<MockRecipeRepository, MockUserRepository, MockImageStore>;

fn user_id(raw: i32) -> UserId {
    UserId::new(raw).expect("valid user id")
}

fn recipe_id(raw: i32) -> RecipeId {
    RecipeId::new(raw).expect("valid recipe id")
}

fn draft(title: &str) -> RecipeDraft {
    RecipeDraft {
        title: title.to_owned(),
        ingredients: "cocoa\r\n\r\nflour\n".to_owned(),
        steps: "mix\n\nbake".to_owned(),
        about: Some("dark and rich".to_owned()),
    }
}

fn upload(filename: &str) -> Option<ImageUpload> {
    Some(ImageUpload {
        filename: filename.to_owned(),
        bytes: vec![0xFF, 0xD8, 0xFF],
    })
}

fn stored_recipe(id: i32, owner: i32, title: &str) -> Recipe {
    Recipe::new(
        recipe_id(id),
        RecipeContent::try_from_draft(draft(title)).expect("valid content"),
        Some(StoragePath::new("static/img/uploads/old.png")),
        user_id(owner),
    )
}

fn uploads_path_store() -> MockImageStore {
    let mut images = MockImageStore::new();
    images.expect_store().returning(|image| {
        Ok(StoragePath::new(format!(
            "static/img/uploads/{}",
            image.filename()
        )))
    });
    images
}

fn service(
    recipes: MockRecipeRepository,
    users: MockUserRepository,
    images: MockImageStore,
) -> TestService {
    RecipeLifecycleService::new(Arc::new(recipes), Arc::new(users), Arc::new(images))
}

#[tokio::test]
async fn create_normalises_text_and_records_photo_path() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_title_exists().returning(|_| Ok(false));
    recipes
        .expect_create()
        .withf(|new| {
            new.content.ingredients.to_text() == "cocoa\nflour"
                && new.content.steps.to_text() == "mix\nbake"
                && new.photo.as_str() == "static/img/uploads/cake.JPG"
                && new.owner.get() == 2
        })
        .times(1)
        .return_once(|_| Ok(RecipeId::new(7).expect("valid id")));

    let id = service(recipes, MockUserRepository::new(), uploads_path_store())
        .create_recipe(user_id(2), draft("Chocolate cake"), upload("cake.JPG"))
        .await
        .expect("create succeeds");

    assert_eq!(id.get(), 7);
}

#[tokio::test]
async fn duplicate_title_is_rejected_before_any_side_effect() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_title_exists().returning(|_| Ok(true));
    recipes.expect_create().times(0);
    let mut images = MockImageStore::new();
    images.expect_store().times(0);

    let err = service(recipes, MockUserRepository::new(), images)
        .create_recipe(user_id(2), draft("Chocolate cake"), None)
        .await
        .expect_err("duplicate title");

    assert_eq!(
        err,
        RecipeError::DuplicateTitle {
            title: "Chocolate cake".to_owned()
        }
    );
}

#[rstest]
#[case::no_photo(None)]
#[case::empty_filename(upload(""))]
#[tokio::test]
async fn missing_photo_name_is_reported(#[case] photo: Option<ImageUpload>) {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_title_exists().returning(|_| Ok(false));
    recipes.expect_create().times(0);
    let mut images = MockImageStore::new();
    images.expect_store().times(0);

    let err = service(recipes, MockUserRepository::new(), images)
        .create_recipe(user_id(2), draft("Soup"), photo)
        .await
        .expect_err("photo required");

    assert_eq!(err, RecipeError::MissingImageName);
}

#[rstest]
#[case("photo")]
#[case("photo.gif")]
#[case("../escape.png")]
#[tokio::test]
async fn refused_photo_names_store_nothing(#[case] filename: &str) {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_title_exists().returning(|_| Ok(false));
    recipes.expect_create().times(0);
    let mut images = MockImageStore::new();
    images.expect_store().times(0);

    let err = service(recipes, MockUserRepository::new(), images)
        .create_recipe(user_id(2), draft("Soup"), upload(filename))
        .await
        .expect_err("invalid image");

    assert!(matches!(err, RecipeError::InvalidImage(_)));
}

#[tokio::test]
async fn image_write_failure_aborts_before_insert() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_title_exists().returning(|_| Ok(false));
    recipes.expect_create().times(0);
    let mut images = MockImageStore::new();
    images
        .expect_store()
        .return_once(|_| Err(ImageStoreError::write("disk full")));

    let err = service(recipes, MockUserRepository::new(), images)
        .create_recipe(user_id(2), draft("Soup"), upload("soup.png"))
        .await
        .expect_err("write failure");

    assert!(matches!(err, RecipeError::Internal { .. }));
}

#[tokio::test]
async fn blank_title_is_invalid_recipe() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_title_exists().times(0);

    let err = service(recipes, MockUserRepository::new(), MockImageStore::new())
        .create_recipe(user_id(2), draft("   "), upload("soup.png"))
        .await
        .expect_err("blank title");

    assert!(matches!(err, RecipeError::InvalidRecipe(_)));
}

#[tokio::test]
async fn edit_by_stranger_reports_not_found_and_changes_nothing() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_recipe(3, 2, "Soup"))));
    recipes.expect_update().times(0);
    let mut images = MockImageStore::new();
    images.expect_store().times(0);

    let err = service(recipes, MockUserRepository::new(), images)
        .edit_recipe(user_id(5), recipe_id(3), draft("Stolen soup"), upload("x.png"))
        .await
        .expect_err("stranger cannot edit");

    assert_eq!(err, RecipeError::NotFound);
}

#[tokio::test]
async fn edit_of_missing_recipe_reports_not_found() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().return_once(|_| Ok(None));
    recipes.expect_update().times(0);

    let err = service(recipes, MockUserRepository::new(), MockImageStore::new())
        .edit_recipe(user_id(2), recipe_id(3), draft("Soup"), None)
        .await
        .expect_err("missing recipe");

    assert_eq!(err, RecipeError::NotFound);
}

#[rstest]
#[case::owner(2)]
#[case::superuser(SUPERUSER_ID.get())]
#[tokio::test]
async fn edit_without_photo_keeps_current_one(#[case] actor: i32) {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_recipe(3, 2, "Soup"))));
    recipes.expect_title_exists().returning(|_| Ok(false));
    recipes
        .expect_update()
        .withf(|id, changes| {
            id.get() == 3
                && changes.photo.is_none()
                && changes.content.title.as_ref() == "Better soup"
                && changes.content.ingredients.as_slice() == ["cocoa", "flour"]
        })
        .times(1)
        .return_once(|_, _| Ok(true));
    let mut images = MockImageStore::new();
    images.expect_store().times(0);

    service(recipes, MockUserRepository::new(), images)
        .edit_recipe(user_id(actor), recipe_id(3), draft("Better soup"), None)
        .await
        .expect("edit succeeds");
}

#[tokio::test]
async fn edit_with_photo_stores_and_records_it() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_recipe(3, 2, "Soup"))));
    recipes.expect_title_exists().times(0);
    recipes
        .expect_update()
        .withf(|_, changes| {
            changes
                .photo
                .as_ref()
                .is_some_and(|path| path.as_str() == "static/img/uploads/new.jpeg")
        })
        .times(1)
        .return_once(|_, _| Ok(true));

    service(recipes, MockUserRepository::new(), uploads_path_store())
        .edit_recipe(user_id(2), recipe_id(3), draft("Soup"), upload("new.jpeg"))
        .await
        .expect("edit succeeds");
}

#[tokio::test]
async fn edit_to_taken_title_is_a_duplicate() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_recipe(3, 2, "Soup"))));
    recipes.expect_title_exists().returning(|_| Ok(true));
    recipes.expect_update().times(0);

    let err = service(recipes, MockUserRepository::new(), MockImageStore::new())
        .edit_recipe(user_id(2), recipe_id(3), draft("Stew"), None)
        .await
        .expect_err("title taken");

    assert!(matches!(err, RecipeError::DuplicateTitle { .. }));
}

#[rstest]
#[case::owner(2, true)]
#[case::superuser(1, true)]
#[case::stranger(9, false)]
#[tokio::test]
async fn delete_honours_ownership(#[case] actor: i32, #[case] allowed: bool) {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_id()
        .return_once(|_| Ok(Some(stored_recipe(3, 2, "Soup"))));
    recipes
        .expect_delete()
        .times(usize::from(allowed))
        .returning(|_| Ok(true));

    let result = service(recipes, MockUserRepository::new(), MockImageStore::new())
        .delete_recipe(user_id(actor), recipe_id(3))
        .await;

    if allowed {
        result.expect("delete succeeds");
    } else {
        assert_eq!(result, Err(RecipeError::NotFound));
    }
}

#[rstest]
#[case::absent(None)]
#[case::empty(Some(String::new()))]
#[case::blank(Some("   ".to_owned()))]
#[tokio::test]
async fn browse_without_query_lists_everything(#[case] query: Option<String>) {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_list_all()
        .times(1)
        .return_once(|| Ok(vec![stored_recipe(2, 2, "B"), stored_recipe(1, 2, "A")]));
    recipes.expect_search().times(0);

    let listing = service(recipes, MockUserRepository::new(), MockImageStore::new())
        .browse(query)
        .await
        .expect("browse succeeds");

    assert!(listing.query.is_none());
    assert_eq!(listing.recipes.len(), 2);
}

#[tokio::test]
async fn browse_with_query_searches() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_search()
        .withf(|query| query == "choco")
        .times(1)
        .return_once(|_| Ok(Vec::new()));
    recipes.expect_list_all().times(0);

    let listing = service(recipes, MockUserRepository::new(), MockImageStore::new())
        .browse(Some("choco".to_owned()))
        .await
        .expect("browse succeeds");

    assert_eq!(listing.query.as_deref(), Some("choco"));
    assert!(listing.nothing_found());
}

#[tokio::test]
async fn connection_failures_surface_as_unavailable() {
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_list_all()
        .return_once(|| Err(RecipePersistenceError::connection("pool exhausted")));

    let err = service(recipes, MockUserRepository::new(), MockImageStore::new())
        .browse(None)
        .await
        .expect_err("connection failure");

    assert!(matches!(err, RecipeError::Unavailable { .. }));
}

#[tokio::test]
async fn detail_of_missing_recipe_is_not_found() {
    let mut recipes = MockRecipeRepository::new();
    recipes.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(recipes, MockUserRepository::new(), MockImageStore::new())
        .recipe_detail(user_id(2), recipe_id(40))
        .await
        .expect_err("missing recipe");

    assert_eq!(err, RecipeError::NotFound);
}

#[tokio::test]
async fn profile_lists_owned_recipes() {
    let owner = User::new(
        user_id(2),
        UserProfileFields {
            email: Email::new("ada@example.com").expect("valid email"),
            surname: PersonName::new("Lovelace", "surname").expect("valid surname"),
            name: PersonName::new("Ada", "name").expect("valid name"),
            age: Age::new(36).expect("valid age"),
        },
    );
    let mut users = MockUserRepository::new();
    users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(owner)));
    let mut recipes = MockRecipeRepository::new();
    recipes
        .expect_find_by_owner()
        .withf(|owner| owner.get() == 2)
        .return_once(|_| Ok(vec![stored_recipe(4, 2, "Stew"), stored_recipe(3, 2, "Soup")]));

    let profile = service(recipes, users, MockImageStore::new())
        .user_profile(user_id(5), user_id(2))
        .await
        .expect("profile");

    assert_eq!(profile.user.name(), "Ada");
    let ids: Vec<i32> = profile.recipes.iter().map(|r| r.id().get()).collect();
    assert_eq!(ids, [4, 3]);
}

#[tokio::test]
async fn profile_of_unknown_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users.expect_find_by_id().return_once(|_| Ok(None));

    let err = service(MockRecipeRepository::new(), users, MockImageStore::new())
        .user_profile(user_id(5), user_id(77))
        .await
        .expect_err("unknown user");

    assert_eq!(err, RecipeError::UserNotFound);
}
